// Sample data document - the static source both collections are loaded from

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::project::Project;
use crate::{ClientbookError, Result};

/// Built-in sample set, used when no data file is configured
const BUILTIN_SAMPLE_DATA: &str = include_str!("../../data/sample_data.json");

/// The JSON document `{"clients": [...], "projects": [...]}`
///
/// Array order is significant: it becomes the storage order that the
/// `clients` query reports. Either array may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleData {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl SampleData {
    /// Parse a sample data document
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a sample data file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ClientbookError::DataSource {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// The sample set compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_SAMPLE_DATA)
    }
}
