//! Unique test-data generators.
//!
//! ULID-suffixed values keep parallel test runs from colliding on the
//! database's unique email index.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@example.test`
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_values_differ() {
        assert_ne!(unique_str("user"), unique_str("user"));
        assert_ne!(unique_email("test"), unique_email("test"));
    }

    #[test]
    fn email_shape() {
        let email = unique_email("reg");
        assert!(email.starts_with("reg-"));
        assert!(email.ends_with("@example.test"));
    }
}
