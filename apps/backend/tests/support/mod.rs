#![allow(dead_code)]

//! Two-stage test harness: build an AppState, then an initialized Actix
//! test service around it.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::web::{self, ServiceConfig};
use actix_web::{test, App, Error as ActixError};
use serde_json::{json, Value};
use time::{Duration, OffsetDateTime};

use backend::error::AppError;
use backend::infra::state::{build_state, StateBuilder};
use backend::middleware::request_trace::RequestTrace;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use backend::{mint_access_token, DbProfile};

/// State builder preconfigured with the in-memory test database.
pub fn test_state_builder() -> StateBuilder {
    build_state().with_db(DbProfile::Test)
}

type RoutesFn = Box<dyn FnOnce(&mut ServiceConfig) + Send>;

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder {
        state,
        router: Router::Unset,
    }
}

enum Router {
    Unset,
    Prod,
    Custom(RoutesFn),
}

pub struct TestAppBuilder {
    state: AppState,
    router: Router,
}

impl TestAppBuilder {
    /// Use the application's production routes (gate included).
    pub fn with_prod_routes(mut self) -> Self {
        self.router = Router::Prod;
        self
    }

    /// Use custom routes for a test.
    pub fn with_routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ServiceConfig) + Send + 'static,
    {
        self.router = Router::Custom(Box::new(f));
        self
    }

    /// Build and initialize the Actix test service.
    pub async fn build(
        self,
    ) -> Result<
        impl Service<Request, Response = ServiceResponse<BoxBody>, Error = ActixError>,
        AppError,
    > {
        let app = App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(self.state.clone()));

        let app = match self.router {
            Router::Unset | Router::Prod => app.configure(backend::routes::configure),
            Router::Custom(f) => app.configure(f),
        };

        let srv = test::init_service(app).await;
        Ok(srv)
    }
}

/// Mint a token valid for 15 minutes.
pub fn mint_test_token(uid: i64, email: &str, security: &SecurityConfig) -> String {
    let expires_at = OffsetDateTime::now_utc() + Duration::minutes(15);
    mint_access_token(uid, email, expires_at, security).expect("mint test token")
}

/// Mint a token that expired twenty minutes ago.
pub fn mint_expired_token(uid: i64, email: &str, security: &SecurityConfig) -> String {
    let expires_at = OffsetDateTime::now_utc() - Duration::minutes(20);
    mint_access_token(uid, email, expires_at, security).expect("mint expired token")
}

/// Register an account through the HTTP surface; returns the new user id.
pub async fn register_user<S>(app: &S, email: &str, password: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = ActixError>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"email": email, "password": password}))
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201, "registration should succeed");

    let body: Value = test::read_body_json(resp).await;
    body["id"].as_i64().expect("registration returns an id")
}

/// Log in through the HTTP surface; returns the bearer token.
pub async fn login_user<S>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = ActixError>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": email, "password": password}))
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "login should succeed");

    let body: Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("login returns a token")
        .to_string()
}
