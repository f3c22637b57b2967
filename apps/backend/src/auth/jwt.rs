use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::OffsetDateTime;

use crate::auth::claims::Claims;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Mint a signed access token for the given user.
///
/// The expiry instant is computed by the caller (now + configured lifetime)
/// and passed in, so the codec never reads a clock for issuance.
pub fn mint_access_token(
    uid: i64,
    email: &str,
    expires_at: OffsetDateTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let claims = Claims {
        uid,
        email: email.to_string(),
        exp: expires_at.unix_timestamp(),
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("failed to encode JWT: {e}")))
}

/// Verify a token and return its claims.
///
/// The algorithm is pinned to the configured one, so tokens declaring any
/// other algorithm fail before their claims are inspected. Signature is
/// checked before expiry. Leeway is zero: `exp` must be in the future at
/// validation time.
///
/// Errors:
/// - expired token -> `AppError::UnauthorizedExpiredJwt`
/// - bad signature or any other decode failure -> `AppError::UnauthorizedInvalidJwt`
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}
