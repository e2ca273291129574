//! Routes for badge queries.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use mealbadges_core::id::ClientId;
use mealbadges_tracking::application::query_handlers;
use mealbadges_tracking::domain::badges::Badge;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /badges/{id}
///
/// Unknown and malformed identifiers both answer with an empty list.
#[instrument(skip(state))]
async fn get_badges(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Badge>>, ApiError> {
    let badges = query_handlers::get_badges(ClientId::parse(&id), state.actor()).await?;
    Ok(Json(badges))
}

/// Returns the router for badge queries.
pub fn router() -> Router<AppState> {
    Router::new().route("/badges/{id}", get(get_badges))
}
