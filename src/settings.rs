// Runtime settings for the Clientbook server
// Layered: built-in defaults, optional settings file, environment variables

//! # Server Settings
//!
//! Settings are assembled once at startup with the `config` crate and never
//! change afterwards. Later layers override earlier ones:
//!
//! 1. Built-in defaults (port 5000, `production`, CORS on)
//! 2. An optional settings file (format picked from the extension)
//! 3. Environment variables `PORT`, `ENVIRONMENT`, `HOST`, `CORS_ENABLED`,
//!    `DATA_PATH`
//!
//! Only the variables above are read from the process environment, so
//! unrelated variables can never leak into the settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::Result;

/// Environment variables consulted by [`ServerSettings::load`]
pub const ENV_KEYS: &[&str] = &["PORT", "ENVIRONMENT", "HOST", "CORS_ENABLED", "DATA_PATH"];

/// Deployment mode, controlling the interactive explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum RunMode {
    Development,
    Production,
    Test,
}

impl RunMode {
    /// GraphiQL is only served in development
    pub fn graphiql_enabled(&self) -> bool {
        matches!(self, RunMode::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
            RunMode::Test => "test",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown environment '{0}' (expected development, production or test)")]
pub struct ParseRunModeError(String);

impl FromStr for RunMode {
    type Err = ParseRunModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(RunMode::Development),
            "production" => Ok(RunMode::Production),
            "test" => Ok(RunMode::Test),
            _ => Err(ParseRunModeError(s.to_string())),
        }
    }
}

impl TryFrom<String> for RunMode {
    type Error = ParseRunModeError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings read once at startup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// IP address to bind
    pub host: String,
    pub port: u16,
    pub environment: RunMode,
    pub cors_enabled: bool,
    /// Sample data file; the built-in set is used when absent
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

impl ServerSettings {
    /// Load settings from defaults, `file` and the process environment
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_from(file, process_env())
    }

    /// Load settings with an explicit environment map
    pub fn load_from(file: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5000_i64)?
            .set_default("environment", RunMode::Production.as_str())?
            .set_default("cors_enabled", true)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(Environment::default().try_parsing(true).source(Some(env)))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: RunMode::Production,
            cors_enabled: true,
            data_path: None,
        }
    }
}

fn process_env() -> HashMap<String, String> {
    ENV_KEYS
        .iter()
        .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
        .collect()
}
