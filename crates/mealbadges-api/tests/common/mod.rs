//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mealbadges_core::clock::Clock;
use mealbadges_test_support::FixedClock;
use mealbadges_tracking::domain::badges::{BadgePolicy, NoBadgePolicy};
use tower::ServiceExt;

use mealbadges_api::config::Config;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

fn config_for(log_path: &Path) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        event_log_path: log_path.to_path_buf(),
        reply_timeout: Duration::from_secs(5),
    }
}

/// Boot the full app over the event log at `log_path`, replaying whatever it
/// already holds. Calling this twice on one path simulates a restart.
pub async fn build_test_app(log_path: &Path) -> Router {
    build_test_app_with_policy(log_path, Arc::new(NoBadgePolicy)).await
}

/// Like [`build_test_app`] with a custom badge policy.
pub async fn build_test_app_with_policy(log_path: &Path, policy: Arc<dyn BadgePolicy>) -> Router {
    let state = mealbadges_api::bootstrap(&config_for(log_path), fixed_clock(), policy)
        .await
        .unwrap();
    mealbadges_api::build_router(state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// A valid POST /meals body for `client_id`.
pub fn meal_body(client_id: &str, meal: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "id": client_id,
        "location": "NYC",
        "date": "2026-01-15T12:30:00.5Z",
        "meal": meal,
        "description": description,
    })
}
