#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use player_api::{app, config::DeleteResponse, AppState};
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Router whose pool points at a port nothing listens on.
pub fn unreachable_app() -> Router {
    let options = PgConnectOptions::new_without_pgpass()
        .host("127.0.0.1")
        .port(1)
        .username("nobody")
        .database("nowhere")
        .ssl_mode(PgSslMode::Disable);

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy_with(options);

    app(AppState::new(pool, DeleteResponse::Message))
}

/// Pool for the database named by `TEST_DATABASE_URL`, with the `player`
/// table in place.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must point at a disposable Postgres database");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("failed to connect to TEST_DATABASE_URL");

    let created = sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS player (
               id SERIAL PRIMARY KEY,
               name TEXT,
               position TEXT
           )"#,
    )
    .execute(&pool)
    .await;

    // Concurrent tests may race on the catalog; the table existing is all that matters
    if let Err(err) = created {
        let exists: Option<String> = sqlx::query_scalar("SELECT to_regclass('player')::text")
            .fetch_one(&pool)
            .await
            .expect("failed to inspect schema");
        assert!(exists.is_some(), "could not create player table: {err}");
    }

    pool
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    execute(app, builder.body(body).unwrap()).await
}

pub async fn execute(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
