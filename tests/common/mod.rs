use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use bankroll::api::router::create_router;
use bankroll::config::AppConfig;
use bankroll::db::Store;
use bankroll::AppState;

/// Router over a fresh in-memory store.
#[allow(dead_code)]
pub fn build_test_app() -> Router {
    build_test_app_with(AppConfig::in_memory())
}

#[allow(dead_code)]
pub fn build_test_app_with(config: AppConfig) -> Router {
    let state = AppState {
        store: Store::memory(),
        config,
        metrics_handle: bankroll::metrics::detached_handle(),
    };
    create_router(state)
}

/// Send a request and decode the JSON response body.
#[allow(dead_code)]
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Money fields are serialized as strings; compare them numerically.
#[allow(dead_code)]
pub fn dec(value: &Value) -> Decimal {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected decimal string, got {value}"))
        .parse()
        .unwrap()
}

/// Connect to the test database and run all migrations. Returns `None` when
/// `TEST_DATABASE_URL` is unset so the Postgres suite is skipped.
#[allow(dead_code)]
pub async fn setup_test_db() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // Clean tables for test isolation
    sqlx::query("DELETE FROM bets").execute(&pool).await.ok();
    sqlx::query("DELETE FROM transactions").execute(&pool).await.ok();

    Some(pool)
}
