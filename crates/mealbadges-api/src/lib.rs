//! Meal badges API: HTTP glue in front of the meal tracking event actor.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use mealbadges_core::clock::Clock;
use mealbadges_event_store::FileEventLog;
use mealbadges_tracking::application::actor::EventActor;
use mealbadges_tracking::application::replay;
use mealbadges_tracking::application::writer::EventWriter;
use mealbadges_tracking::domain::badges::BadgePolicy;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;

/// Opens the event log, starts the event actor and replays the log into it.
///
/// Returns once every logged event has been applied, so the caller can
/// start accepting traffic against a fully rebuilt registry.
///
/// # Errors
///
/// Returns `AppError::Replay` if the log cannot be opened, read or decoded.
pub async fn bootstrap(
    config: &Config,
    clock: Arc<dyn Clock>,
    policy: Arc<dyn BadgePolicy>,
) -> Result<AppState, AppError> {
    let log = FileEventLog::open(&config.event_log_path)
        .await
        .map_err(AppError::Replay)?;
    let (actor, _task) = EventActor::spawn(policy, config.reply_timeout);

    let summary = replay::replay(&log, &actor)
        .await
        .map_err(AppError::Replay)?;
    info!(
        path = %log.path().display(),
        replayed = summary.replayed,
        "registry rebuilt from event log"
    );

    let writer = EventWriter::new(Arc::new(log), actor);
    Ok(AppState::new(clock, Arc::new(writer)))
}

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::meals::router())
        .merge(routes::badges::router())
        .merge(routes::clients::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
