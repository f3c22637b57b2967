//! Password hashing and verification (Argon2id).
//!
//! [`hash_password`] generates a random salt via `OsRng`, hashes the
//! plaintext with the default Argon2id parameters and returns a PHC-format
//! string (`$argon2id$v=19$...`), which is what the `users.password_hash`
//! column stores. [`verify_password`] parses a stored PHC string and checks
//! a plaintext against it: mismatch is `Ok(false)`, not an error; `Err`
//! means the stored hash itself is malformed.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::domain::{DomainError, InfraErrorKind};

pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            DomainError::infra(InfraErrorKind::Hashing, format!("failed to hash password: {e}"))
        })?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, DomainError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        DomainError::infra(InfraErrorKind::Hashing, format!("invalid password hash: {e}"))
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
