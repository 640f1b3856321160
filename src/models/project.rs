// Project records carried alongside clients in the sample data

use serde::{Deserialize, Serialize};

use super::client::ClientId;

/// Progress of a project, spelled the way the sample data spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

/// A project belonging to a client
///
/// Projects are loaded with the clients but the GraphQL schema does not
/// expose them. `client_id` is not checked against the client collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub client_id: ClientId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
}
