// Clientbook Engine
// Storage and the GraphQL schema built on top of it

//! # Clientbook Engine Module
//!
//! The layer between the domain models and the HTTP server.
//!
//! ## Engine Components
//!
//! ### Storage Engine (`storage` module)
//! - [`ClientStore`]: the ordered, read-only client collection
//! - [`ClientRepository`]: the async trait resolvers read through
//!
//! ### GraphQL Engine (`graphql` module)
//! - The `Client` object type and the `RootQueryType` root
//! - Schema construction with the store injected as schema data
//! - A startup check that every declared field is actually bound

pub mod graphql;
pub mod storage;

pub use graphql::{create_schema, verify_schema, ClientGQL, ClientbookSchema, Query};
pub use storage::{ClientRepository, ClientStore};
