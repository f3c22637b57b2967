//! Task operations, always scoped to the authenticated owner.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::tasks::{self, Task, TaskStatus};

pub async fn create_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    title: &str,
    description: &str,
) -> Result<i64, AppError> {
    let task = tasks::insert_task(conn, user_id, title, description).await?;
    info!(user_id, task_id = task.id, "created task");
    Ok(task.id)
}

pub async fn list_tasks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Task>, AppError> {
    Ok(tasks::find_all_by_user(conn, user_id).await?)
}

pub async fn task_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    task_id: i64,
    user_id: i64,
) -> Result<Task, AppError> {
    tasks::find_by_id_for_user(conn, task_id, user_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Task, format!("Task {task_id} not found")).into()
        })
}

pub async fn change_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    task_id: i64,
    user_id: i64,
    status: TaskStatus,
) -> Result<Task, AppError> {
    let updated = tasks::update_status(conn, task_id, user_id, status)
        .await?
        .ok_or_else(|| {
            AppError::from(DomainError::not_found(
                NotFoundKind::Task,
                format!("Task {task_id} not found"),
            ))
        })?;

    info!(user_id, task_id, status = status.as_str(), "changed task status");
    Ok(updated)
}
