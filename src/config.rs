//! Dashboard configuration
//!
//! Loaded from YAML:
//!
//! ```yaml
//! source:
//!   kind: file
//!   path: Cleaned_data.csv
//! graph:
//!   uri: http://localhost:7474
//!   database: neo4j
//!   username: neo4j
//!   timeout_secs: 10
//! http:
//!   address: 0.0.0.0
//!   port: 8501
//! ```
//!
//! The graph section is optional for a file source; without it the zip
//! graph view reports the store as unavailable.

use nci_graph::ConnectionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{NciError, NciResult};

/// Environment variable consulted when the graph password is not configured
pub const PASSWORD_ENV: &str = "NCI_GRAPH_PASSWORD";

/// Where the complaint table comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// A CSV file with the complaint columns
    File { path: PathBuf },
    /// The graph store described by the `graph` section
    Graph,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::File { path: PathBuf::from("Cleaned_data.csv") }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8501,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub source: SourceConfig,
    /// Graph store connection (required for `kind: graph`)
    #[serde(default)]
    pub graph: Option<ConnectionConfig>,
    #[serde(default)]
    pub http: HttpConfig,
}

impl DashboardConfig {
    /// Parse a YAML document
    pub fn from_yaml(text: &str) -> NciResult<Self> {
        let config: DashboardConfig = serde_yaml::from_str(text)
            .map_err(|e| NciError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> NciResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| NciError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml(&text)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> NciResult<()> {
        if self.source == SourceConfig::Graph && self.graph.is_none() {
            return Err(NciError::Config(
                "source kind 'graph' requires a 'graph' connection section".to_string(),
            ));
        }
        if let Some(graph) = &self.graph {
            if graph.timeout_secs == 0 {
                return Err(NciError::Config("graph timeout_secs must be at least 1".to_string()));
            }
        }
        Ok(())
    }

    /// Graph connection with the password filled in from the environment
    /// when the file does not carry one.
    pub fn graph_connection(&self) -> Option<ConnectionConfig> {
        let mut conn = self.graph.clone()?;
        if conn.password.is_none() {
            conn.password = std::env::var(PASSWORD_ENV).ok();
        }
        Some(conn)
    }
}
