//! Registration and login orchestration over the credential core.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::repos::users;
use crate::state::security_config::SecurityConfig;

/// Create an account for the given credentials, returning the new user id.
///
/// The plaintext is hashed before anything touches the store; a duplicate
/// email surfaces as a conflict from the store's unique index.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    password: &str,
) -> Result<i64, AppError> {
    let password_hash = hash_password(password)?;
    let user = users::create_user(conn, email, &password_hash).await?;

    info!(user_id = user.id, email = %Redacted(email), "registered new user");
    Ok(user.id)
}

/// Verify credentials and mint an access token.
///
/// Unknown email and wrong password collapse into one `InvalidCredentials`
/// error so a caller cannot probe which emails are registered. The expiry
/// instant is computed here (now + configured lifetime) and handed to the
/// codec.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = match users::find_user_by_email(conn, email).await? {
        Some(user) => user,
        None => {
            warn!(email = %Redacted(email), "login attempt for unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, email = %Redacted(email), "login attempt with wrong password");
        return Err(AppError::invalid_credentials());
    }

    let expires_at = OffsetDateTime::now_utc() + security.token_ttl;
    let token = mint_access_token(user.id, &user.email, expires_at, security)?;

    info!(user_id = user.id, "login succeeded");
    Ok(token)
}
