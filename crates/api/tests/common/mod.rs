#![allow(dead_code)]

use std::sync::Arc;

use amora_core::clock::{Clock, FixedClock};
use amora_core::types::Timestamp;
use amora_db::repositories::Repositories;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::TimeZone;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use amora_api::config::ServerConfig;
use amora_api::router::build_app_router;
use amora_api::services::Services;
use amora_api::state::AppState;

/// Acting user sent with every authenticated request.
pub const ACTOR: &str = "42";

/// The instant every test clock reports.
pub fn now() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));
    AppState {
        pool: pool.clone(),
        config: Arc::new(test_config()),
        services: Services::new(Repositories::new(pool), clock),
        shutdown: CancellationToken::new(),
    }
}

/// Build the full application router (same middleware stack as production)
/// on a fixed clock.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(test_state(pool), &test_config())
}

async fn send(app: Router, method: Method, uri: &str, actor: Option<&str>, body: Body) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(actor) = actor {
        builder = builder.header("x-user-id", actor);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(ACTOR), Body::from(json.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(ACTOR), Body::from(json.to_string())).await
}

/// Send a JSON request acting as `actor` instead of [`ACTOR`].
pub async fn send_as(
    app: Router,
    method: Method,
    uri: &str,
    actor: &str,
    json: serde_json::Value,
) -> Response<Body> {
    send(app, method, uri, Some(actor), Body::from(json.to_string())).await
}

/// Send a raw body, e.g. malformed JSON.
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &'static str) -> Response<Body> {
    send(app, method, uri, Some(ACTOR), Body::from(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(ACTOR), Body::empty()).await
}

/// Send a request with no `x-user-id` header.
pub async fn anonymous(app: Router, method: Method, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, method, uri, None, Body::from(json.to_string())).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
