//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use mealbadges_tracking::application::query_handlers;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Registered clients.
    pub clients: usize,
    /// Meals recorded across all clients.
    pub meals: usize,
}

/// GET /health
///
/// Round-trips through the event actor, so a stalled actor shows up here.
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let stats = query_handlers::get_stats(state.actor()).await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        clients: stats.clients,
        meals: stats.meals,
    }))
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
