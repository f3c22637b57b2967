//! Database connection management and schema bootstrap.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Connect to the given database URL.
///
/// An in-memory SQLite database exists per connection, so for that URL the
/// pool is pinned to a single connection; otherwise every pooled connection
/// would see its own empty database.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_string());
    opts.sqlx_logging(false);
    if url.starts_with("sqlite::memory:") {
        opts.max_connections(1).min_connections(1);
    }

    Database::connect(opts)
        .await
        .map_err(|e| AppError::db(format!("failed to connect to database: {e}")))
}

/// Connect and bring the schema up to date. Single entrypoint used by both
/// the server bootstrap and the test harness.
pub async fn bootstrap_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(url).await?;
    migration::migrate_up(&conn)
        .await
        .map_err(|e| AppError::db(format!("migrations failed: {e}")))?;
    info!("database ready");
    Ok(conn)
}

/// Canonical accessor for the database connection held in AppState.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}
