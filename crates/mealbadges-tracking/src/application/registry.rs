//! In-memory client registry. Owned by the event actor and nothing else.

use std::collections::HashMap;

use mealbadges_core::id::ClientId;

use crate::domain::aggregates::Client;

/// Map from client identifier to client aggregate.
#[derive(Debug, Default)]
pub(crate) struct ClientRegistry {
    clients: HashMap<ClientId, Client>,
    meal_count: usize,
}

impl ClientRegistry {
    pub(crate) fn get(&self, id: &ClientId) -> Option<&Client> {
        self.clients.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &ClientId) -> Option<&mut Client> {
        self.clients.get_mut(id)
    }

    /// Inserts an empty client. Returns `false` if it already existed.
    pub(crate) fn register(&mut self, id: ClientId) -> bool {
        if self.clients.contains_key(&id) {
            return false;
        }
        self.clients.insert(id, Client::new(id));
        true
    }

    pub(crate) fn note_meal_recorded(&mut self) {
        self.meal_count += 1;
    }

    pub(crate) fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub(crate) fn meal_count(&self) -> usize {
        self.meal_count
    }
}
