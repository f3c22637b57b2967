//! Shared helpers for backend tests: logging bootstrap and unique test data.

pub mod logging;
pub mod unique_helpers;
