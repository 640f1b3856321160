// Clientbook - Rust Edition
// A read-only GraphQL API over an in-memory collection of clients

//! # Clientbook Library
//!
//! This is the library root for Clientbook, a small GraphQL service that
//! answers queries over a fixed collection of client records. The collection
//! is loaded once at startup and never changes afterwards.
//!
//! ## Core Components
//!
//! ### Domain Models
//! - [`Client`]: a client record (`id`, `name`, `email`, `phone`)
//! - [`Project`]: a project record carried by the sample data
//! - [`SampleData`]: the JSON document both collections are loaded from
//!
//! ### Engine
//! - [`ClientStore`]: the read-only, ordered collection behind every resolver
//! - [`ClientRepository`]: the storage seam the GraphQL resolvers depend on
//! - [`create_schema`] / [`verify_schema`]: schema construction and the
//!   startup completeness check
//!
//! ### Server
//! - [`GraphQLServerBuilder`]: wires settings, data and schema into an Axum
//!   HTTP server exposing `/graphql` and `/health`
//!
//! **Usage Example:**
//! ```rust
//! use clientbook::{create_schema, Client, ClientStore};
//!
//! let store = ClientStore::new(vec![
//!     Client::new("1", "Alice", "a@x.com", "111"),
//!     Client::new("2", "Bob", "b@x.com", "222"),
//! ]);
//! let _schema = create_schema(store);
//! ```
//!
//! ## Rust Learning Notes:
//!
//! ### Re-exports
//! `pub use` statements create shortcuts so users don't need to know the
//! internal module structure. Instead of `clientbook::engine::storage::ClientStore`
//! users can write `clientbook::ClientStore`.

// Core domain models
pub mod models;

// Storage and GraphQL schema
pub mod engine;

// HTTP server setup
pub mod server;

// Layered runtime settings
pub mod settings;

pub use models::{Client, ClientId, Project, ProjectStatus, SampleData};

pub use engine::{
    graphql::{create_schema, verify_schema, ClientGQL, ClientbookSchema, Query},
    storage::{ClientRepository, ClientStore},
};

pub use server::graphql::{GraphQLServer, GraphQLServerBuilder, GraphQLServerConfig};

pub use settings::{RunMode, ServerSettings};

use thiserror::Error;

/// Errors raised while starting or running Clientbook
///
/// Request-level failures (malformed documents, unknown fields) never show up
/// here: they are answered inside the HTTP response cycle. Everything in this
/// enum happens at startup and is fatal.
///
/// ## Rust Learning Notes:
///
/// ### The `thiserror` Crate
/// - `#[derive(Error)]` implements the `std::error::Error` trait
/// - `#[error("...")]` provides human-readable error messages
/// - `#[from]` enables automatic conversion with the `?` operator
#[derive(Error, Debug)]
pub enum ClientbookError {
    /// Settings could not be assembled from defaults, file and environment
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The sample data file could not be read
    #[error("Could not read sample data from {path}: {source}")]
    DataSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The sample data document is not valid JSON of the expected shape
    #[error("Malformed sample data: {0}")]
    DataFormat(#[from] serde_json::Error),

    /// A declared schema type is missing one of its expected fields
    #[error("Schema type {type_name} is missing fields: {missing}")]
    SchemaIncomplete { type_name: String, missing: String },

    /// The configured host is not an IP address
    #[error("Invalid listen address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),

    /// Binding or serving failed
    #[error("Server error: {0}")]
    Server(#[from] hyper::Error),
}

/// Type alias for Results that use our custom error type
pub type Result<T> = std::result::Result<T, ClientbookError>;
