//! Task repository functions (generic over ConnectionTrait).
//!
//! Every query here is filtered by the owning user's id. A task belonging
//! to another user is indistinguishable from a missing one at this layer.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entities::tasks;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Task status. Unknown stored values read back as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Done => "Done",
        }
    }

    /// Strict parse used for client input; `None` for anything unknown.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(TaskStatus::Pending),
            "Done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    fn from_stored(s: &str) -> Self {
        TaskStatus::parse(s).unwrap_or(TaskStatus::Pending)
    }
}

/// Task domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<tasks::Model> for Task {
    fn from(model: tasks::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            status: TaskStatus::from_stored(&model.status),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn insert_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    title: &str,
    description: &str,
) -> Result<Task, DomainError> {
    let now = OffsetDateTime::now_utc();
    let task_active = tasks::ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        status: Set(TaskStatus::Pending.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let task = task_active.insert(conn).await.map_err(map_db_err)?;
    Ok(Task::from(task))
}

pub async fn find_all_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Task>, DomainError> {
    let models = tasks::Entity::find()
        .filter(tasks::Column::UserId.eq(user_id))
        .order_by_asc(tasks::Column::Id)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(models.into_iter().map(Task::from).collect())
}

pub async fn find_by_id_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    task_id: i64,
    user_id: i64,
) -> Result<Option<Task>, DomainError> {
    let model = tasks::Entity::find_by_id(task_id)
        .filter(tasks::Column::UserId.eq(user_id))
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(model.map(Task::from))
}

/// Owner-scoped status update. Returns the updated task, or `None` when the
/// task does not exist or belongs to another user.
pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    task_id: i64,
    user_id: i64,
    status: TaskStatus,
) -> Result<Option<Task>, DomainError> {
    let model = tasks::Entity::find_by_id(task_id)
        .filter(tasks::Column::UserId.eq(user_id))
        .one(conn)
        .await
        .map_err(map_db_err)?;

    let Some(model) = model else {
        return Ok(None);
    };

    let mut task_active: tasks::ActiveModel = model.into();
    task_active.status = Set(status.as_str().to_string());
    task_active.updated_at = Set(OffsetDateTime::now_utc());

    let task = task_active.update(conn).await.map_err(map_db_err)?;
    Ok(Some(Task::from(task)))
}
