//! Routes for recording meals.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use chrono::{DateTime, Utc};
use mealbadges_core::error::DomainError;
use mealbadges_core::id::ClientId;
use mealbadges_tracking::application::command_handlers;
use mealbadges_tracking::domain::commands::RecordMeal;
use mealbadges_tracking::domain::meal::{ClientMeal, MealSlot};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::CommandResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /meals.
#[derive(Debug, Deserialize)]
pub struct MealRequest {
    /// Client identifier in UUID text form.
    pub id: String,
    /// Where the meal was eaten.
    pub location: String,
    /// When the meal was eaten (RFC 3339).
    pub date: DateTime<Utc>,
    /// `"Breakfast"`, `"Lunch"` or `"Dinner"`.
    pub meal: String,
    /// Free-text description.
    pub description: String,
}

impl TryFrom<MealRequest> for ClientMeal {
    type Error = DomainError;

    fn try_from(request: MealRequest) -> Result<Self, Self::Error> {
        let slot = MealSlot::from_name(&request.meal).ok_or_else(|| {
            DomainError::Validation(format!("invalid meal: {:?}", request.meal))
        })?;
        Ok(Self {
            client: ClientId::parse(&request.id).as_bytes().to_vec(),
            location: request.location,
            date: request.date,
            meal: slot.code(),
            description: request.description,
        })
    }
}

/// POST /meals
#[instrument(skip(state, payload))]
async fn record_meal(
    State(state): State<AppState>,
    payload: Result<Json<MealRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CommandResponse>), ApiError> {
    let Json(request) = payload?;
    let command = RecordMeal {
        correlation_id: Uuid::new_v4(),
        meal: ClientMeal::try_from(request)?,
    };

    info!(correlation_id = %command.correlation_id, "handling record_meal command");

    let stored = command_handlers::handle_record_meal(command, state.clock.as_ref(), &state.writer)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(CommandResponse {
            event_id: stored.event_id,
        }),
    ))
}

/// Returns the router for meal intake.
pub fn router() -> Router<AppState> {
    Router::new().route("/meals", post(record_meal))
}
