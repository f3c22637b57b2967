use actix_web::web;

pub mod auth;
pub mod health;
pub mod tasks;

use crate::middleware::jwt_extract::JwtExtract;

/// Configure application routes.
///
/// The tasks scope carries the authentication gate; registration, login and
/// health stay public. Tests build the same tree through this function, so
/// the gate is exercised exactly as in production.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Auth routes: /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Task routes: /api/tasks/** (protected)
    cfg.service(
        web::scope("/api/tasks")
            .wrap(JwtExtract)
            .configure(tasks::configure_routes),
    );
}
