//! The event actor: the single writer of all client state.
//!
//! Every mutation and query is sent through one unbounded queue and handled
//! by one task, in arrival order, one at a time. The client registry is
//! moved into that task and never shared, so no lock guards it.
//!
//! Producers hold an [`ActorHandle`]. Mutations are fire-and-enqueue;
//! queries carry a `oneshot` sender and the producer awaits exactly one
//! reply, bounded by the handle's reply timeout.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use mealbadges_core::error::DomainError;
use mealbadges_core::id::ClientId;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::query_handlers::ClientView;
use super::registry::ClientRegistry;
use crate::domain::aggregates::Client;
use crate::domain::badges::{Badge, BadgePolicy};
use crate::domain::events::{TrackingEvent, TrackingEventKind};

/// Counters describing the registry, answered by [`Query::Stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    /// Registered clients.
    pub clients: usize,
    /// Meals recorded across all clients.
    pub meals: usize,
    /// Mutations handled, including dropped ones.
    pub mutations_handled: u64,
}

/// A read against the registry. Each variant owns the sender its answer goes
/// to; the actor consumes it when replying.
#[derive(Debug)]
pub enum Query {
    /// Badges of a client; empty for unknown clients.
    Badges {
        /// The client to look up.
        client_id: ClientId,
        /// Where the answer goes.
        reply: oneshot::Sender<Vec<Badge>>,
    },
    /// Full snapshot of a client, or `None` if unknown.
    Client {
        /// The client to look up.
        client_id: ClientId,
        /// Where the answer goes.
        reply: oneshot::Sender<Option<ClientView>>,
    },
    /// Registry counters.
    Stats {
        /// Where the answer goes.
        reply: oneshot::Sender<RegistryStats>,
    },
}

/// Everything the actor can be asked to do.
#[derive(Debug)]
pub enum Event {
    /// Change registry state. Must already be durably logged.
    Mutation(TrackingEvent),
    /// Read registry state without changing it.
    Query(Query),
}

/// The actor itself. Build it with [`EventActor::spawn`] or
/// [`EventActor::new`] + [`EventActor::run`].
pub struct EventActor {
    registry: ClientRegistry,
    policy: Arc<dyn BadgePolicy>,
    receiver: mpsc::UnboundedReceiver<Event>,
    mutations_handled: u64,
}

impl EventActor {
    /// Creates an actor with an empty registry and the handle that feeds it.
    #[must_use]
    pub fn new(policy: Arc<dyn BadgePolicy>, reply_timeout: Duration) -> (Self, ActorHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let actor = Self {
            registry: ClientRegistry::default(),
            policy,
            receiver,
            mutations_handled: 0,
        };
        (
            actor,
            ActorHandle {
                sender,
                reply_timeout,
            },
        )
    }

    /// Creates an actor and runs it on a new tokio task.
    ///
    /// The task ends once every [`ActorHandle`] clone has been dropped and the
    /// queue has drained.
    #[must_use]
    pub fn spawn(
        policy: Arc<dyn BadgePolicy>,
        reply_timeout: Duration,
    ) -> (ActorHandle, JoinHandle<()>) {
        let (actor, handle) = Self::new(policy, reply_timeout);
        (handle, tokio::spawn(actor.run()))
    }

    /// Receive loop: take the next event, handle it to completion, repeat.
    pub async fn run(mut self) {
        info!("event actor started");
        while let Some(event) = self.receiver.recv().await {
            self.handle(event);
        }
        info!(
            mutations_handled = self.mutations_handled,
            clients = self.registry.client_count(),
            "event actor stopped"
        );
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Mutation(event) => self.apply(event),
            Event::Query(query) => self.answer(query),
        }
    }

    fn apply(&mut self, event: TrackingEvent) {
        self.mutations_handled += 1;
        let event_id = event.metadata.event_id;
        match event.kind {
            TrackingEventKind::ClientRegistered(payload) => {
                if self.registry.register(payload.client_id) {
                    debug!(client_id = %payload.client_id, %event_id, "client registered");
                } else {
                    debug!(client_id = %payload.client_id, %event_id, "client already registered");
                }
            }
            TrackingEventKind::MealRecorded(meal) => {
                let client_id = meal.client;
                let Some(client) = self.registry.get_mut(&client_id) else {
                    debug!(%client_id, %event_id, "dropping meal for unknown client");
                    return;
                };
                client.record_meal(meal);
                if let Some(badges) = recompute_badges(self.policy.as_ref(), client) {
                    client.replace_badges(badges);
                }
                self.registry.note_meal_recorded();
            }
        }
    }

    fn answer(&self, query: Query) {
        match query {
            Query::Badges { client_id, reply } => {
                let badges = self
                    .registry
                    .get(&client_id)
                    .map(|client| client.badges().to_vec())
                    .unwrap_or_default();
                send_reply(reply, badges, "badges");
            }
            Query::Client { client_id, reply } => {
                let view = self.registry.get(&client_id).map(ClientView::from);
                send_reply(reply, view, "client");
            }
            Query::Stats { reply } => {
                let stats = RegistryStats {
                    clients: self.registry.client_count(),
                    meals: self.registry.meal_count(),
                    mutations_handled: self.mutations_handled,
                };
                send_reply(reply, stats, "stats");
            }
        }
    }
}

/// Runs the policy, containing a panic so it cannot take the actor down.
/// `None` means the client keeps its previous badges.
fn recompute_badges(policy: &dyn BadgePolicy, client: &Client) -> Option<Vec<Badge>> {
    if let Ok(badges) = panic::catch_unwind(AssertUnwindSafe(|| policy.recompute(client))) {
        Some(badges)
    } else {
        error!(client_id = %client.id(), "badge policy panicked; keeping previous badges");
        None
    }
}

fn send_reply<T>(reply: oneshot::Sender<T>, value: T, query: &'static str) {
    if reply.send(value).is_err() {
        debug!(query, "producer stopped waiting before the reply arrived");
    }
}

/// Cloneable producer-side handle to the event actor.
#[derive(Debug, Clone)]
pub struct ActorHandle {
    sender: mpsc::UnboundedSender<Event>,
    reply_timeout: Duration,
}

impl ActorHandle {
    /// Enqueues a mutation. Never blocks.
    ///
    /// Callers must have made the event durable first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ActorUnavailable` if the actor has stopped.
    pub fn submit(&self, event: TrackingEvent) -> Result<(), DomainError> {
        self.sender
            .send(Event::Mutation(event))
            .map_err(|_| DomainError::ActorUnavailable)
    }

    /// Asks for a client's badges.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ActorUnavailable` if the actor has stopped, or
    /// `DomainError::ReplyTimeout` if it does not answer in time.
    pub async fn badges(&self, client_id: ClientId) -> Result<Vec<Badge>, DomainError> {
        self.ask(|reply| Query::Badges { client_id, reply }, Some(self.reply_timeout))
            .await
    }

    /// Asks for a snapshot of a client.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ActorUnavailable` if the actor has stopped, or
    /// `DomainError::ReplyTimeout` if it does not answer in time.
    pub async fn client(&self, client_id: ClientId) -> Result<Option<ClientView>, DomainError> {
        self.ask(|reply| Query::Client { client_id, reply }, Some(self.reply_timeout))
            .await
    }

    /// Asks for registry counters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ActorUnavailable` if the actor has stopped, or
    /// `DomainError::ReplyTimeout` if it does not answer in time.
    pub async fn stats(&self) -> Result<RegistryStats, DomainError> {
        self.ask(|reply| Query::Stats { reply }, Some(self.reply_timeout))
            .await
    }

    /// Waits, without a timeout, until every event enqueued so far has been
    /// handled, then returns the registry counters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ActorUnavailable` if the actor has stopped.
    pub async fn barrier(&self) -> Result<RegistryStats, DomainError> {
        self.ask(|reply| Query::Stats { reply }, None).await
    }

    async fn ask<T>(
        &self,
        query: impl FnOnce(oneshot::Sender<T>) -> Query,
        timeout: Option<Duration>,
    ) -> Result<T, DomainError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Event::Query(query(reply)))
            .map_err(|_| DomainError::ActorUnavailable)?;

        let received = match timeout {
            Some(limit) => tokio::time::timeout(limit, response)
                .await
                .map_err(|_| DomainError::ReplyTimeout(limit))?,
            None => response.await,
        };
        received.map_err(|_| DomainError::ActorUnavailable)
    }
}
