//! Registration and login flows through the HTTP surface.
//!
//! Run: cargo test --test auth_flow

mod common;
mod support;

use actix_web::test;
use backend::state::security_config::SecurityConfig;
use backend::verify_access_token;
use backend_test_support::unique_helpers::unique_email;
use common::assert_problem_details;
use serde_json::{json, Value};
use support::{create_test_app, login_user, register_user, test_state_builder};

#[actix_web::test]
async fn register_then_login_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let security = SecurityConfig::for_tests();
    let state = test_state_builder()
        .with_security(security.clone())
        .build()
        .await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let email = unique_email("roundtrip");
    let user_id = register_user(&app, &email, "correct horse battery").await;
    assert!(user_id > 0);

    let token = login_user(&app, &email, "correct horse battery").await;

    // the token embeds the registered user's identity
    let claims = verify_access_token(&token, &security)?;
    assert_eq!(claims.uid, user_id);
    assert_eq!(claims.email, email);

    Ok(())
}

#[actix_web::test]
async fn duplicate_email_conflicts_and_keeps_one_record() -> Result<(), Box<dyn std::error::Error>>
{
    let state = test_state_builder().build().await?;
    let state_handle = state.clone();
    let app = create_test_app(state).with_prod_routes().build().await?;

    let email = unique_email("dup");
    let first_id = register_user(&app, &email, "password-one").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": email, "password": "password-two"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 409, "EMAIL_TAKEN").await;

    // the store still holds exactly the first record
    let db = backend::require_db(&state_handle)?;
    let stored = backend::repos::users::find_user_by_email(db, &email)
        .await?
        .expect("user should exist");
    assert_eq!(stored.id, first_id);

    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    let count = backend::entities::users::Entity::find()
        .filter(backend::entities::users::Column::Email.eq(email.as_str()))
        .count(db)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

#[actix_web::test]
async fn registration_validation_errors() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_builder().build().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    // bad email
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": "not-an-email", "password": "longenough"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 400, "INVALID_EMAIL").await;

    // short password
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": unique_email("short"), "password": "seven77"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 400, "PASSWORD_TOO_SHORT").await;

    // malformed body
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"email": "x@y.test", "password""#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 400, "BAD_REQUEST").await;

    Ok(())
}

#[actix_web::test]
async fn login_failures_are_indistinguishable() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_builder().build().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let email = uniq_registered(&app).await;

    // wrong password for a known email
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": email, "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body_wrong_password = assert_problem_details(resp, 401, "INVALID_CREDENTIALS").await;

    // unknown email entirely
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": unique_email("ghost"), "password": "whatever-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body_unknown_email = assert_problem_details(resp, 401, "INVALID_CREDENTIALS").await;

    // identical client-visible shape apart from the per-request trace id
    assert_eq!(body_wrong_password["code"], body_unknown_email["code"]);
    assert_eq!(body_wrong_password["detail"], body_unknown_email["detail"]);
    assert_eq!(body_wrong_password["title"], body_unknown_email["title"]);
    assert_eq!(body_wrong_password["type"], body_unknown_email["type"]);

    Ok(())
}

async fn uniq_registered<S>(app: &S) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        Error = actix_web::Error,
    >,
{
    let email = unique_email("known");
    register_user(app, &email, "the-right-password").await;
    email
}

#[actix_web::test]
async fn health_reports_db_connectivity() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_builder().build().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");

    Ok(())
}
