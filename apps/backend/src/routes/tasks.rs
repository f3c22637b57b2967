use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::infra::db::require_db;
use crate::repos::tasks::{Task, TaskStatus};
use crate::services;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub status: String,
    pub created: String,
    pub updated: String,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<TaskResponse>,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            title: t.title,
            description: t.description,
            status: t.status.as_str().to_string(),
            created: format_ts(t.created_at),
            updated: format_ts(t.updated_at),
        }
    }
}

fn format_ts(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| "unknown".to_string())
}

async fn create_task(
    auth: CurrentUser,
    body: ValidatedJson<CreateTaskRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();

    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::invalid(
            "INVALID_TITLE",
            "Title cannot be empty".to_string(),
        ));
    }

    let db = require_db(&app_state)?;
    let id = services::tasks::create_task(
        db,
        auth.id,
        title,
        req.description.as_deref().unwrap_or(""),
    )
    .await?;

    Ok(HttpResponse::Created().json(CreateTaskResponse { id }))
}

async fn list_tasks(
    auth: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let tasks = services::tasks::list_tasks(db, auth.id).await?;

    Ok(HttpResponse::Ok().json(TasksResponse {
        tasks: tasks.into_iter().map(TaskResponse::from).collect(),
    }))
}

async fn get_task(
    auth: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let task_id = path.into_inner();

    let db = require_db(&app_state)?;
    let task = services::tasks::task_by_id(db, task_id, auth.id).await?;

    Ok(HttpResponse::Ok().json(TaskResponse::from(task)))
}

async fn update_status(
    auth: CurrentUser,
    path: web::Path<i64>,
    body: ValidatedJson<ChangeStatusRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let task_id = path.into_inner();
    let req = body.into_inner();

    let status = TaskStatus::parse(&req.status).ok_or_else(|| {
        AppError::invalid(
            "INVALID_STATUS",
            format!("Unknown status '{}', expected Pending or Done", req.status),
        )
    })?;

    let db = require_db(&app_state)?;
    let task = services::tasks::change_status(db, task_id, auth.id, status).await?;

    Ok(HttpResponse::Ok().json(TaskResponse::from(task)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_task))
            .route(web::get().to(list_tasks)),
    );
    cfg.service(web::resource("/{id}").route(web::get().to(get_task)));
    cfg.service(web::resource("/{id}/status").route(web::patch().to(update_status)));
}
