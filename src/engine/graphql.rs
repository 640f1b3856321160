// GraphQL API for Clientbook
// Read-only schema: a Client object type and a root query type with two fields

use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema, SimpleObject, ID};
use tracing::debug;

use crate::engine::storage::{ClientRepository, ClientStore};
use crate::models::Client;
use crate::{ClientbookError, Result};

/// Fields the `Client` object type must expose
pub const CLIENT_FIELDS: &[&str] = &["id", "name", "email", "phone"];

/// Fields the root query type must expose
pub const ROOT_QUERY_FIELDS: &[&str] = &["clients", "client"];

/// Name of the root query type as seen by clients (`__typename`, introspection)
pub const ROOT_QUERY_TYPE: &str = "RootQueryType";

pub type ClientbookSchema = Schema<Query, EmptyMutation, EmptySubscription>;

// GraphQL types - API representations of the domain models

#[derive(SimpleObject, Debug, Clone, PartialEq)]
#[graphql(name = "Client")]
pub struct ClientGQL {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<Client> for ClientGQL {
    fn from(client: Client) -> Self {
        Self {
            id: ID(client.id.0),
            name: client.name,
            email: client.email,
            phone: client.phone,
        }
    }
}

// GraphQL Query root
pub struct Query;

#[Object(name = "RootQueryType")]
impl Query {
    /// List every client in storage order
    async fn clients(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ClientGQL>> {
        let storage = ctx.data::<Arc<dyn ClientRepository>>()?;
        match storage.list_clients().await {
            Ok(clients) => Ok(clients.into_iter().map(ClientGQL::from).collect()),
            Err(e) => Err(async_graphql::Error::new(format!(
                "Failed to list clients: {}",
                e
            ))),
        }
    }

    /// Get a client by ID
    ///
    /// Returns null when no client matches. A missing or null `id` matches
    /// nothing.
    async fn client(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> async_graphql::Result<Option<ClientGQL>> {
        let Some(id) = id else {
            debug!("client lookup without id");
            return Ok(None);
        };

        let storage = ctx.data::<Arc<dyn ClientRepository>>()?;
        match storage.get_client(id.as_str()).await {
            Ok(found) => {
                debug!(id = %id.as_str(), found = found.is_some(), "client lookup");
                Ok(found.map(ClientGQL::from))
            }
            Err(e) => Err(async_graphql::Error::new(format!(
                "Failed to get client: {}",
                e
            ))),
        }
    }
}

/// Create the schema over an explicitly constructed store
pub fn create_schema(store: ClientStore) -> ClientbookSchema {
    create_schema_with_repository(Arc::new(store))
}

/// Create the schema over any repository implementation
pub fn create_schema_with_repository(repository: Arc<dyn ClientRepository>) -> ClientbookSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription)
        .data(repository)
        .finish()
}

/// Check that every declared field is bound on the built schema
///
/// The schema is introspected rather than trusted, so a renamed or dropped
/// resolver fails startup instead of failing client queries.
pub async fn verify_schema(schema: &ClientbookSchema) -> Result<()> {
    verify_type_fields(schema, "Client", CLIENT_FIELDS).await?;
    verify_type_fields(schema, ROOT_QUERY_TYPE, ROOT_QUERY_FIELDS).await
}

/// Check that `type_name` exposes every field in `expected`
pub async fn verify_type_fields(
    schema: &ClientbookSchema,
    type_name: &str,
    expected: &[&str],
) -> Result<()> {
    let present = introspect_fields(schema, type_name).await;
    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|field| !present.iter().any(|p| p == field))
        .collect();

    if !missing.is_empty() {
        return Err(ClientbookError::SchemaIncomplete {
            type_name: type_name.to_string(),
            missing: missing.join(", "),
        });
    }
    debug!("✅ Schema type {} exposes {}", type_name, expected.join(", "));
    Ok(())
}

async fn introspect_fields(schema: &ClientbookSchema, type_name: &str) -> Vec<String> {
    let query = format!(r#"{{ __type(name: "{}") {{ fields {{ name }} }} }}"#, type_name);
    let data = schema.execute(query).await.data.into_json().unwrap_or_default();

    data["__type"]["fields"]
        .as_array()
        .map(|fields| {
            fields
                .iter()
                .filter_map(|field| field["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
