// Clientbook - GraphQL Server
// Run with: cargo run --bin server

//! # Clientbook Server Binary
//!
//! Starts the HTTP server exposing the read-only client API.
//!
//! ```text
//! main()
//!   ↓ loads
//! ServerSettings (defaults → settings file → environment → CLI flags)
//!   ↓ configures
//! GraphQLServerBuilder
//!   ↓ loads sample data, builds and verifies the schema
//! HTTP Server (Axum) on /graphql and /health
//! ```
//!
//! Any startup failure (bad configuration, unreadable sample data, port in
//! use) is logged and the process exits with a non-zero status.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clientbook::{GraphQLServerBuilder, RunMode, ServerSettings};
use dotenv::dotenv;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "clientbook-server", version, about = "Read-only GraphQL API over sample client data")]
struct Args {
    /// Settings file (TOML, YAML or JSON, picked by extension)
    #[arg(long, env = "CLIENTBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// IP address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// development, production or test (overrides ENVIRONMENT)
    #[arg(long)]
    environment: Option<RunMode>,

    /// Sample data JSON file (overrides DATA_PATH)
    #[arg(long)]
    data: Option<PathBuf>,
}

impl Args {
    fn apply(self, settings: &mut ServerSettings) {
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(host) = self.host {
            settings.host = host;
        }
        if let Some(environment) = self.environment {
            settings.environment = environment;
        }
        if let Some(data) = self.data {
            settings.data_path = Some(data);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; it must be loaded before RUST_LOG is read
    let dotenv_result = dotenv();

    setup_tracing();
    if let Err(e) = dotenv_result {
        debug!("No .env file loaded: {}", e);
    }

    let args = Args::parse();
    debug!(?args, "parsed arguments");

    if let Err(e) = run(args).await {
        error!("💥 {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut settings =
        ServerSettings::load(args.config.as_deref()).context("failed to load settings")?;
    args.apply(&mut settings);

    info!("🚀 Starting Clientbook Server...");
    info!("Environment: {}", settings.environment);
    info!("Server: {}:{}", settings.host, settings.port);
    info!(
        "GraphiQL: {}",
        if settings.environment.graphiql_enabled() { "enabled" } else { "disabled" }
    );

    GraphQLServerBuilder::new()
        .with_settings(&settings)
        .build_and_run()
        .await
        .context("server failed")?;

    Ok(())
}

fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
