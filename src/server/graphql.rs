// GraphQL server implementation for Clientbook
// Serves the read-only schema over HTTP at /graphql

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use async_graphql::http::GraphiQLSource;
use async_graphql::{ParseRequestError, ServerError, Value};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router, Server,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::engine::{
    graphql::{create_schema, verify_schema, ClientbookSchema},
    storage::ClientStore,
};
use crate::models::SampleData;
use crate::settings::ServerSettings;
use crate::Result;

/// Path serving both the query endpoint and, in development, the explorer
pub const GRAPHQL_PATH: &str = "/graphql";

/// GraphQL server configuration
#[derive(Clone, Debug)]
pub struct GraphQLServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    pub graphiql_enabled: bool,
}

impl Default for GraphQLServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_enabled: true,
            graphiql_enabled: false,
        }
    }
}

impl From<&ServerSettings> for GraphQLServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            cors_enabled: settings.cors_enabled,
            graphiql_enabled: settings.environment.graphiql_enabled(),
        }
    }
}

#[derive(Clone)]
struct AppState {
    schema: ClientbookSchema,
    graphiql_enabled: bool,
}

/// Body returned when a document is rejected before execution
#[derive(Serialize)]
struct RejectedDocument {
    errors: Vec<ServerError>,
}

impl RejectedDocument {
    fn respond(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Request bodies or query strings that could not be read as a GraphQL request
///
/// Answered like a rejected document: 400 with an `errors` list. Oversized
/// payloads keep 413.
#[derive(Debug)]
pub struct RequestRejection(pub ParseRequestError);

impl From<ParseRequestError> for RequestRejection {
    fn from(err: ParseRequestError) -> Self {
        RequestRejection(err)
    }
}

impl IntoResponse for RequestRejection {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ParseRequestError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        let message = self.0.to_string();
        warn!(error = %message, "❌ Unreadable GraphQL request");

        RejectedDocument {
            errors: vec![ServerError::new(message, None)],
        }
        .respond(status)
    }
}

/// GraphQL server
pub struct GraphQLServer {
    config: GraphQLServerConfig,
    store: Option<ClientStore>,
    data_path: Option<PathBuf>,
}

impl GraphQLServer {
    pub fn new() -> Self {
        Self {
            config: GraphQLServerConfig::default(),
            store: None,
            data_path: None,
        }
    }

    pub fn with_config(mut self, config: GraphQLServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Serve this store instead of loading sample data
    pub fn with_store(mut self, store: ClientStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_data_path(mut self, path: Option<PathBuf>) -> Self {
        self.data_path = path;
        self
    }

    /// Resolve the store: explicit store, then data file, then built-in set
    fn load_store(&mut self) -> Result<ClientStore> {
        if let Some(store) = self.store.take() {
            return Ok(store);
        }

        let data = match &self.data_path {
            Some(path) => {
                info!("📂 Loading sample data from {}", path.display());
                SampleData::from_path(path)?
            }
            None => {
                info!("📦 Using built-in sample data");
                SampleData::builtin()?
            }
        };
        Ok(ClientStore::from_sample_data(data))
    }

    /// Load data, build and verify the schema, and assemble the router
    pub async fn prepare(&mut self) -> Result<Router> {
        let store = self.load_store()?;
        info!(
            "📋 Loaded {} clients and {} projects",
            store.clients().len(),
            store.projects().len()
        );

        let schema = create_schema(store);
        verify_schema(&schema).await?;

        Ok(create_router(schema, &self.config))
    }

    pub async fn run(mut self) -> Result<()> {
        let app = self.prepare().await?;

        let ip: IpAddr = self.config.host.parse()?;
        let addr = SocketAddr::new(ip, self.config.port);

        let server = Server::try_bind(&addr)?;

        info!("🚀 GraphQL server running on http://{}", addr);
        info!("🔗 GraphQL endpoint: http://{}{}", addr, GRAPHQL_PATH);
        if self.config.graphiql_enabled {
            info!("📊 GraphiQL interface: http://{}{}", addr, GRAPHQL_PATH);
        }

        server
            .serve(app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("👋 Server stopped");
        Ok(())
    }
}

impl Default for GraphQLServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that assembles a server from [`ServerSettings`]
pub struct GraphQLServerBuilder {
    server: GraphQLServer,
}

impl GraphQLServerBuilder {
    pub fn new() -> Self {
        Self {
            server: GraphQLServer::new(),
        }
    }

    pub fn with_settings(mut self, settings: &ServerSettings) -> Self {
        self.server = self
            .server
            .with_config(GraphQLServerConfig::from(settings))
            .with_data_path(settings.data_path.clone());
        self
    }

    pub fn with_store(mut self, store: ClientStore) -> Self {
        self.server = self.server.with_store(store);
        self
    }

    pub fn build(self) -> GraphQLServer {
        self.server
    }

    pub async fn build_and_run(self) -> Result<()> {
        self.server.run().await
    }
}

impl Default for GraphQLServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the Axum router around a schema
pub fn create_router(schema: ClientbookSchema, config: &GraphQLServerConfig) -> Router {
    let state = AppState {
        schema,
        graphiql_enabled: config.graphiql_enabled,
    };

    let app = Router::new()
        .route(GRAPHQL_PATH, get(graphql_get_handler).post(graphql_handler))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.cors_enabled {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

// GraphQL handler for POST requests
async fn graphql_handler(
    State(state): State<AppState>,
    req: GraphQLRequest<RequestRejection>,
) -> Response {
    execute(&state.schema, req.into_inner()).await
}

// GET serves the explorer to browsers in development, otherwise executes the
// query-string request
async fn graphql_get_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: std::result::Result<GraphQLRequest<RequestRejection>, RequestRejection>,
) -> Response {
    if state.graphiql_enabled && accepts_html(&headers) {
        return Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response();
    }

    match req {
        Ok(req) => execute(&state.schema, req.into_inner()).await,
        Err(rejection) => rejection.into_response(),
    }
}

/// Execute a request, mapping documents rejected before execution to 400
///
/// Resolvers never fail, so a response with errors and no data can only come
/// from parsing or validation.
async fn execute(schema: &ClientbookSchema, request: async_graphql::Request) -> Response {
    let response = schema.execute(request).await;

    if response.is_err() && response.data == Value::Null {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        warn!(errors = ?messages, "❌ Rejected query document");
        return RejectedDocument {
            errors: response.errors,
        }
        .respond(StatusCode::BAD_REQUEST);
    }

    GraphQLResponse::from(response).into_response()
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |accept| accept.contains("text/html"))
}

// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Clientbook GraphQL server is running")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(?e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown signal received");
}
