//! Command handlers for the Meal Tracking context.
//!
//! Each handler validates its command, builds the domain event stamped with
//! the server clock and passes it to the [`EventWriter`], which logs it
//! before the actor applies it.

use mealbadges_core::clock::Clock;
use mealbadges_core::error::DomainError;
use mealbadges_core::log::StoredEvent;
use tracing::info;

use super::writer::EventWriter;
use crate::domain::commands::{RecordMeal, RegisterClient};
use crate::domain::events::{ClientRegistered, TrackingEvent, TrackingEventKind};
use crate::domain::meal::Meal;

/// Handles the `RecordMeal` command: validates the submitted meal, stamps it
/// and makes it durable before enqueueing it.
///
/// A meal for a client that is not registered is still accepted and logged;
/// the actor drops it when applying.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the meal is invalid, or any error
/// from [`EventWriter::accept`].
pub async fn handle_record_meal(
    command: RecordMeal,
    clock: &dyn Clock,
    writer: &EventWriter,
) -> Result<StoredEvent, DomainError> {
    let meal = Meal::accept(command.meal, clock)?;
    let occurred_at = meal.timestamp;
    let event = TrackingEvent::new(
        TrackingEventKind::MealRecorded(meal),
        command.correlation_id,
        occurred_at,
    );

    info!(
        correlation_id = %command.correlation_id,
        client_id = %event.kind.client_id(),
        "recording meal"
    );
    writer.accept(event).await
}

/// Handles the `RegisterClient` command. Registering a known client again is
/// accepted and has no effect on its state.
///
/// # Errors
///
/// Returns `DomainError::Validation` for the invalid client sentinel, or any
/// error from [`EventWriter::accept`].
pub async fn handle_register_client(
    command: &RegisterClient,
    clock: &dyn Clock,
    writer: &EventWriter,
) -> Result<StoredEvent, DomainError> {
    if !command.client_id.is_valid() {
        return Err(DomainError::Validation(
            "id must be a non-nil 16-byte client identifier".to_owned(),
        ));
    }
    let event = TrackingEvent::new(
        TrackingEventKind::ClientRegistered(ClientRegistered {
            client_id: command.client_id,
        }),
        command.correlation_id,
        clock.now(),
    );

    info!(
        correlation_id = %command.correlation_id,
        client_id = %command.client_id,
        "registering client"
    );
    writer.accept(event).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use mealbadges_core::error::DomainError;
    use mealbadges_core::id::ClientId;
    use mealbadges_core::log::EventLog;
    use mealbadges_test_support::{FailingEventLog, FixedClock, RecordingEventLog};
    use uuid::Uuid;

    use crate::application::actor::{ActorHandle, EventActor};
    use crate::application::command_handlers::{handle_record_meal, handle_register_client};
    use crate::application::writer::EventWriter;
    use crate::domain::badges::NoBadgePolicy;
    use crate::domain::commands::{RecordMeal, RegisterClient};
    use crate::domain::events::{CLIENT_REGISTERED, MEAL_RECORDED};
    use crate::domain::meal::{ClientMeal, MealSlot};

    fn spawn_actor() -> ActorHandle {
        let (actor, _task) = EventActor::spawn(Arc::new(NoBadgePolicy), Duration::from_secs(5));
        actor
    }

    fn record_meal(client_id: ClientId, location: &str) -> RecordMeal {
        RecordMeal {
            correlation_id: Uuid::new_v4(),
            meal: ClientMeal {
                client: client_id.as_bytes().to_vec(),
                location: location.to_owned(),
                date: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
                meal: MealSlot::Lunch.code(),
                description: "Pasta".to_owned(),
            },
        }
    }

    fn register(client_id: ClientId) -> RegisterClient {
        RegisterClient {
            correlation_id: Uuid::new_v4(),
            client_id,
        }
    }

    #[tokio::test]
    async fn test_handle_record_meal_logs_then_applies() {
        // Arrange
        let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 5, 0).unwrap();
        let clock = FixedClock(fixed_now);
        let log = Arc::new(RecordingEventLog::new(Vec::new()));
        let writer = EventWriter::new(log.clone(), spawn_actor());
        let client_id = ClientId::new_random();
        handle_register_client(&register(client_id), &clock, &writer)
            .await
            .unwrap();
        let command = record_meal(client_id, "NYC");
        let correlation_id = command.correlation_id;

        // Act
        let stored = handle_record_meal(command, &clock, &writer).await.unwrap();

        // Assert
        assert_eq!(stored.event_type, MEAL_RECORDED);
        assert_eq!(stored.aggregate_id, client_id);
        assert_eq!(stored.correlation_id, correlation_id);
        assert_eq!(stored.occurred_at, fixed_now);

        let appended = log.appended_events();
        assert_eq!(appended.len(), 2);
        assert_eq!(appended[0].event_type, CLIENT_REGISTERED);
        assert_eq!(appended[1], stored);

        let view = writer.actor().client(client_id).await.unwrap().unwrap();
        assert_eq!(view.meals.len(), 1);
        assert_eq!(view.meals[0].timestamp, fixed_now);
    }

    #[tokio::test]
    async fn test_handle_record_meal_rejects_invalid_meal_without_logging() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let log = Arc::new(RecordingEventLog::new(Vec::new()));
        let writer = EventWriter::new(log.clone(), spawn_actor());

        // Act
        let result = handle_record_meal(record_meal(ClientId::new_random(), ""), &clock, &writer).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(log.appended_events().is_empty());
        assert_eq!(writer.actor().stats().await.unwrap().mutations_handled, 0);
    }

    #[tokio::test]
    async fn test_log_failure_fails_request_and_leaves_actor_untouched() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let writer = EventWriter::new(Arc::new(FailingEventLog), spawn_actor());
        let client_id = ClientId::new_random();

        // Act
        let register_result = handle_register_client(&register(client_id), &clock, &writer).await;
        let meal_result = handle_record_meal(record_meal(client_id, "NYC"), &clock, &writer).await;

        // Assert
        assert!(matches!(register_result, Err(DomainError::Infrastructure(_))));
        assert!(matches!(meal_result, Err(DomainError::Infrastructure(_))));
        let stats = writer.actor().stats().await.unwrap();
        assert_eq!(stats.mutations_handled, 0);
        assert_eq!(stats.clients, 0);
    }

    #[tokio::test]
    async fn test_handle_register_client_rejects_invalid_sentinel() {
        let clock = FixedClock(Utc::now());
        let log = Arc::new(RecordingEventLog::new(Vec::new()));
        let writer = EventWriter::new(log.clone(), spawn_actor());

        let result = handle_register_client(&register(ClientId::INVALID), &clock, &writer).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(log.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_producers_log_in_application_order() {
        // Arrange
        let clock = Arc::new(FixedClock(Utc::now()));
        let log = Arc::new(RecordingEventLog::new(Vec::new()));
        let writer = Arc::new(EventWriter::new(log.clone(), spawn_actor()));
        let client_id = ClientId::new_random();
        handle_register_client(&register(client_id), clock.as_ref(), &writer)
            .await
            .unwrap();

        // Act
        let producers: Vec<_> = (0..24)
            .map(|i| {
                let writer = Arc::clone(&writer);
                let clock = Arc::clone(&clock);
                tokio::spawn(async move {
                    handle_record_meal(record_meal(client_id, &format!("loc-{i}")), clock.as_ref(), &writer)
                        .await
                        .unwrap();
                })
            })
            .collect();
        for producer in producers {
            producer.await.unwrap();
        }

        // Assert
        let logged: Vec<String> = log
            .appended_events()
            .iter()
            .skip(1)
            .map(|e| e.payload["MealRecorded"]["location"].as_str().unwrap().to_owned())
            .collect();
        let view = writer.actor().client(client_id).await.unwrap().unwrap();
        let applied: Vec<String> = view.meals.iter().map(|m| m.location.clone()).collect();
        assert_eq!(applied.len(), 24);
        assert_eq!(logged, applied);
    }
}
