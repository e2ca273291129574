//! Routes for client registration and lookup.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use mealbadges_core::id::ClientId;
use mealbadges_tracking::application::command_handlers;
use mealbadges_tracking::application::query_handlers::{self, ClientView};
use mealbadges_tracking::domain::commands::RegisterClient;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::CommandResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /clients.
#[derive(Debug, Deserialize)]
pub struct RegisterClientRequest {
    /// Client identifier in UUID text form.
    pub id: String,
}

/// POST /clients
#[instrument(skip(state, payload))]
async fn register_client(
    State(state): State<AppState>,
    payload: Result<Json<RegisterClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CommandResponse>), ApiError> {
    let Json(request) = payload?;
    let command = RegisterClient {
        correlation_id: Uuid::new_v4(),
        client_id: ClientId::parse(&request.id),
    };

    info!(correlation_id = %command.correlation_id, "handling register_client command");

    let stored =
        command_handlers::handle_register_client(&command, state.clock.as_ref(), &state.writer)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommandResponse {
            event_id: stored.event_id,
        }),
    ))
}

/// GET /clients/{id}
#[instrument(skip(state))]
async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClientView>, ApiError> {
    let view = query_handlers::get_client_by_id(ClientId::parse(&id), state.actor()).await?;
    Ok(Json(view))
}

/// Returns the router for client registration and lookup.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", post(register_client))
        .route("/clients/{id}", get(get_client))
}
