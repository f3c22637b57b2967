use std::fmt;

use jsonwebtoken::Algorithm;
use time::Duration;

/// Token-signing configuration injected into the codec and the gate.
#[derive(Clone)]
pub struct SecurityConfig {
    /// Symmetric secret for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Pinned signing algorithm; tokens declaring any other are rejected
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub token_ttl: Duration,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>, token_ttl: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl,
        }
    }

    /// Short-lived config with a fixed secret for tests.
    pub fn for_tests() -> Self {
        Self::new(
            b"test_secret_key_for_testing_purposes_only".to_vec(),
            Duration::minutes(15),
        )
    }
}

// Manual Debug: the secret must never reach a log line.
impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
