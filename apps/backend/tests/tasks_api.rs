//! Owner-scoped task CRUD through the HTTP surface.
//!
//! Run: cargo test --test tasks_api

mod common;
mod support;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use backend_test_support::unique_helpers::unique_email;
use common::assert_problem_details;
use serde_json::{json, Value};
use support::{create_test_app, login_user, register_user, test_state_builder};

async fn create_task<S>(app: &S, token: &str, title: &str, description: Option<&str>) -> i64
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let mut payload = json!({ "title": title });
    if let Some(description) = description {
        payload["description"] = json!(description);
    }

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(payload)
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    body["id"].as_i64().expect("task creation returns an id")
}

async fn signup<S>(app: &S, prefix: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let email = unique_email(prefix);
    register_user(app, &email, "a-fine-password").await;
    login_user(app, &email, "a-fine-password").await
}

#[actix_web::test]
async fn create_list_get_update_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_builder().build().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let token = signup(&app, "crud").await;

    let first = create_task(&app, &token, "buy milk", None).await;
    let second = create_task(&app, &token, "write report", Some("quarterly numbers")).await;

    // list returns both, in insertion order, all Pending
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    let tasks = body["tasks"].as_array().expect("tasks array");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["id"], first);
    assert_eq!(tasks[1]["id"], second);
    assert_eq!(tasks[0]["status"], "Pending");
    assert_eq!(tasks[1]["description"], "quarterly numbers");

    // fetch one
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{second}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "write report");

    // flip status, then observe it on a subsequent fetch
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{first}/status"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"status": "Done"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Done");

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{first}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Done");

    Ok(())
}

#[actix_web::test]
async fn tasks_are_invisible_across_owners() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_builder().build().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let token_alice = signup(&app, "alice").await;
    let token_bob = signup(&app, "bob").await;

    let alice_task = create_task(&app, &token_alice, "alice's task", None).await;

    // bob's list is empty
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {token_bob}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["tasks"].as_array().expect("tasks array").len(), 0);

    // bob cannot fetch alice's task
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{alice_task}"))
        .insert_header(("Authorization", format!("Bearer {token_bob}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 404, "TASK_NOT_FOUND").await;

    // bob cannot update alice's task either
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{alice_task}/status"))
        .insert_header(("Authorization", format!("Bearer {token_bob}")))
        .set_json(json!({"status": "Done"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 404, "TASK_NOT_FOUND").await;

    // and alice's task is untouched
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{alice_task}"))
        .insert_header(("Authorization", format!("Bearer {token_alice}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Pending");

    Ok(())
}

#[actix_web::test]
async fn task_input_validation() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_builder().build().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let token = signup(&app, "validation").await;

    // empty title
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"title": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 400, "INVALID_TITLE").await;

    // unknown status string never reaches the store
    let task_id = create_task(&app, &token, "real task", None).await;
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{task_id}/status"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"status": "Archived"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 400, "INVALID_STATUS").await;

    Ok(())
}

#[actix_web::test]
async fn task_routes_require_authentication() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_builder().build().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let err = app.call(req).await.expect_err("expected gate rejection");
    assert_eq!(err.as_response_error().status_code().as_u16(), 401);

    Ok(())
}
