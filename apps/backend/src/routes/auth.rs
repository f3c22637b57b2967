use std::sync::LazyLock;

use actix_web::{web, HttpResponse};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::validated_json::ValidatedJson;
use crate::infra::db::require_db;
use crate::services;
use crate::state::app_state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

/// SAFETY: vetted literal, compiles successfully
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Input validation happens here, before any plaintext reaches the core.
fn validate_credentials(req: &CredentialsRequest) -> Result<(), AppError> {
    if !EMAIL_RE.is_match(&req.email) {
        return Err(AppError::invalid(
            "INVALID_EMAIL",
            "Email address is not valid".to_string(),
        ));
    }

    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::invalid(
            "PASSWORD_TOO_SHORT",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }

    Ok(())
}

/// Create a new account and return its id.
async fn register(
    body: ValidatedJson<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    validate_credentials(&req)?;

    let db = require_db(&app_state)?;
    let id = services::auth::register(db, &req.email, &req.password).await?;

    Ok(HttpResponse::Created().json(RegisterResponse { id }))
}

/// Verify credentials and return a bearer token.
async fn login(
    body: ValidatedJson<CredentialsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    validate_credentials(&req)?;

    let db = require_db(&app_state)?;
    let token = services::auth::login(db, &app_state.security, &req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)));
    cfg.service(web::resource("/login").route(web::post().to(login)));
}
