use std::env;

use time::Duration;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Production database, addressed by `DATABASE_URL`
    Prod,
    /// Test database: private in-memory SQLite per state build
    Test,
}

/// Resolve the connection URL for a profile.
pub fn db_url(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("DATABASE_URL"),
        DbProfile::Test => Ok("sqlite::memory:".to_string()),
    }
}

/// Server configuration read from the environment at startup.
///
/// The JWT secret is security-sensitive: it is carried here only long
/// enough to build `SecurityConfig`, and Debug masks it.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AppConfig {
    /// Environment variables:
    /// - `BACKEND_HOST` (default `0.0.0.0`)
    /// - `BACKEND_PORT` (default `3001`)
    /// - `BACKEND_JWT_SECRET` (required)
    /// - `TOKEN_TTL_SECS` (default 3600)
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("BACKEND_PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| AppError::config("BACKEND_PORT must be a valid port number".to_string()))?;

        let jwt_secret = must_var("BACKEND_JWT_SECRET")?;

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<i64>()
            .map_err(|_| AppError::config("TOKEN_TTL_SECS must be an integer".to_string()))?;
        if token_ttl_secs <= 0 {
            return Err(AppError::config(
                "TOKEN_TTL_SECS must be positive".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            jwt_secret,
            token_ttl: Duration::seconds(token_ttl_secs),
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
