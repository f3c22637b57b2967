//! SeaORM -> DomainError translation helpers.
//!
//! Repos convert `sea_orm::DbErr` into `DomainError` here; higher layers
//! then map `DomainError` to `AppError` via `From`.

use sea_orm::{DbErr, SqlErr};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
        // SQLite reports "UNIQUE constraint failed: users.email";
        // Postgres reports the index name "ux_users_email".
        if msg.contains("users.email") || msg.contains("ux_users_email") {
            return DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered");
        }
        return DomainError::conflict(
            ConflictKind::Other("UniqueConstraint".into()),
            "Unique constraint violated",
        );
    }

    match &e {
        DbErr::RecordNotFound(_) => {
            DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found")
        }
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            DomainError::infra(InfraErrorKind::DbUnavailable, e.to_string())
        }
        _ => DomainError::infra(InfraErrorKind::Other("Db".into()), e.to_string()),
    }
}
