//! User repository functions (generic over ConnectionTrait).
//!
//! Only password *hashes* cross this boundary; callers hash before calling
//! in. Consumers import just the capability they need: registration uses
//! [`create_user`], login uses [`find_user_by_email`].

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::users;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}

/// Insert a new user row.
///
/// Email uniqueness is enforced by the database's unique index, not by a
/// pre-check here, so two registrations racing on the same email collapse
/// to one row; the loser surfaces as `Conflict(UniqueEmail)`.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    password_hash: &str,
) -> Result<User, DomainError> {
    let now = OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(now),
    };

    let user = user_active.insert(conn).await.map_err(map_db_err)?;
    Ok(User::from(user))
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(User::from))
}
