// Clientbook Server Implementations
// Exposes the GraphQL engine over HTTP

//! # Clientbook Server Module
//!
//! ## Server Architecture
//!
//! ```text
//! Client (browser, Apollo, curl)
//!        ↓ HTTP POST/GET /graphql
//! Server Layer (this module) ← Axum router, CORS, request tracing
//!        ↓ Schema::execute
//! Engine Layer ← schema, resolvers, ClientStore
//!        ↓ reads
//! Domain Layer ← Client records
//! ```
//!
//! ## Endpoints
//!
//! - `POST /graphql`: JSON body `{query, variables?, operationName?}`
//! - `GET /graphql`: the same fields as query-string parameters, or the
//!   GraphiQL explorer for browsers when running in development
//! - `GET /health`: liveness text
//!
//! Documents that fail to parse or validate are answered with HTTP 400 and an
//! `errors` list. Valid documents always get HTTP 200 with `data`, even when a
//! lookup finds nothing.

/// GraphQL HTTP server implementation
pub mod graphql;

pub use graphql::{create_router, GraphQLServer, GraphQLServerBuilder, GraphQLServerConfig};

#[cfg(test)]
mod graphql_tests;
