//! Access-token claims inserted into request extensions by the
//! authentication gate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Owning user's database id
    pub uid: i64,
    pub email: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
