// Core domain models for Clientbook
// These are plain serde data structures, independent of GraphQL and HTTP

//! # Domain Models Module
//!
//! The records served by Clientbook and the document they are loaded from.
//!
//! ## Rust Learning Notes:
//!
//! ### Module Declarations
//! Each `pub mod` declaration tells Rust to look for a `.rs` file with that
//! name in this directory and include it as a public submodule.
//!
//! ### Re-exports for Clean APIs
//! Users can import `clientbook::models::Client` instead of
//! `clientbook::models::client::Client`.

// Contains ClientId and Client - the only record exposed through GraphQL
pub mod client;

// Contains Project and ProjectStatus - sample data that is loaded but not exposed
pub mod project;

// Contains SampleData - the JSON source document for both collections
pub mod sample_data;

pub use client::{Client, ClientId};
pub use project::{Project, ProjectStatus};
pub use sample_data::SampleData;
