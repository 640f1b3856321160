// Storage abstraction for the query engine
// This defines the read-only interface the GraphQL resolvers use

//! # Storage Layer
//!
//! The resolvers never touch a global: they read through a
//! [`ClientRepository`] that is handed to the schema when it is built.
//! [`ClientStore`] is the in-memory implementation, constructed once at
//! startup from [`SampleData`] (or directly from fixture records in tests).
//!
//! ## Thread Safety
//!
//! The store has no interior mutability at all. Once built it is shared
//! behind an `Arc` and every request reads it concurrently without locking.
//!
//! ## Rust Learning Notes:
//!
//! ### Async Traits
//! The `async-trait` crate provides a macro that enables async methods in
//! traits. The in-memory store never awaits anything, but the trait keeps the
//! door open for backends that do.
//!
//! ### Trait Bounds
//! - `Send`: type can be safely moved between threads
//! - `Sync`: type can be safely shared between threads via references
//! Both are required to store the repository as `Arc<dyn ClientRepository>`.

use std::collections::HashSet;

use tracing::warn;

use crate::models::{Client, Project, SampleData};
use crate::Result;

/// Read interface for client records
///
/// ## Return Value
/// `Result<Option<Client>>` means:
/// - `Ok(Some(client))`: found the client
/// - `Ok(None)`: no client with that ID (not an error)
/// - `Err(error)`: the backend failed
#[async_trait::async_trait]
pub trait ClientRepository: Send + Sync {
    /// All clients, in storage order
    async fn list_clients(&self) -> Result<Vec<Client>>;

    /// The first client whose id exactly equals `id`
    async fn get_client(&self, id: &str) -> Result<Option<Client>>;
}

/// In-memory, immutable client collection
///
/// Records keep the order they were given in. That order is what `clients`
/// returns and what breaks ties between duplicate ids.
#[derive(Debug, Clone, Default)]
pub struct ClientStore {
    clients: Vec<Client>,
    projects: Vec<Project>,
}

impl ClientStore {
    /// Build a store holding only clients
    pub fn new(clients: Vec<Client>) -> Self {
        Self {
            clients,
            projects: Vec::new(),
        }
    }

    /// Build a store from a loaded sample data document
    ///
    /// Duplicate client ids are kept and logged; lookups resolve to the first.
    pub fn from_sample_data(data: SampleData) -> Self {
        let store = Self {
            clients: data.clients,
            projects: data.projects,
        };

        for id in store.duplicate_ids() {
            warn!("⚠️  Duplicate client id '{}' in sample data; lookups return the first", id);
        }

        store
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// First client in storage order whose id exactly equals `id`
    pub fn find_client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|client| client.has_id(id))
    }

    /// Ids that appear more than once, each reported once, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        self.clients
            .iter()
            .map(|client| client.id.as_str())
            .filter(|id| !seen.insert(*id) && reported.insert(*id))
            .collect()
    }
}

#[async_trait::async_trait]
impl ClientRepository for ClientStore {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        Ok(self.clients.clone())
    }

    async fn get_client(&self, id: &str) -> Result<Option<Client>> {
        Ok(self.find_client(id).cloned())
    }
}
