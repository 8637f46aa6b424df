//! Data models shared by RemoteClient and MemoryClient
//!
//! `QueryResult` keeps the tabular shape every client returns; `Row` gives
//! typed access to a single record by column name.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{GraphError, GraphResult};

/// Statement parameters (`$name` placeholders in Cypher)
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Result of executing a Cypher statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names
    pub columns: Vec<String>,
    /// Tabular result rows
    pub records: Vec<Vec<serde_json::Value>>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, records: Vec::new() }
    }

    /// Number of result records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the result is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records with column-name access
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().map(move |values| Row { columns: &self.columns, values })
    }
}

/// A borrowed view of one result record
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [serde_json::Value],
}

impl<'a> Row<'a> {
    /// Raw value of a column, `None` if the column is not part of the result
    pub fn get(&self, column: &str) -> Option<&'a serde_json::Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    /// Column as text. Numbers are accepted and rendered in decimal, since
    /// stores differ on whether codes are stored as strings or integers.
    pub fn get_string(&self, column: &str) -> GraphResult<String> {
        match self.get_opt_string(column)? {
            Some(s) => Ok(s),
            None => Err(GraphError::UnexpectedResult(format!("column '{}' is null", column))),
        }
    }

    /// Column as text, `None` when the value is null
    pub fn get_opt_string(&self, column: &str) -> GraphResult<Option<String>> {
        match self.require(column)? {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::String(s) => Ok(Some(s.clone())),
            serde_json::Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(GraphError::UnexpectedResult(
                format!("column '{}' is not text: {}", column, other)
            )),
        }
    }

    /// Column as a non-negative integer
    pub fn get_u64(&self, column: &str) -> GraphResult<u64> {
        let value = self.require(column)?;
        if let Some(n) = value.as_u64() {
            return Ok(n);
        }
        match value.as_f64() {
            Some(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
            _ => Err(GraphError::UnexpectedResult(
                format!("column '{}' is not a count: {}", column, value)
            )),
        }
    }

    fn require(&self, column: &str) -> GraphResult<&'a serde_json::Value> {
        self.get(column).ok_or_else(|| {
            GraphError::UnexpectedResult(format!("missing column '{}'", column))
        })
    }
}

fn default_uri() -> String {
    "http://localhost:7474".to_string()
}

fn default_database() -> String {
    "neo4j".to_string()
}

fn default_username() -> String {
    "neo4j".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Connection settings for a Neo4j server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// HTTP base URI of the server
    #[serde(default = "default_uri")]
    pub uri: String,
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,
    /// User for basic auth
    #[serde(default = "default_username")]
    pub username: String,
    /// Password for basic auth (optional, can be loaded from env if None)
    #[serde(default)]
    pub password: Option<String>,
    /// Upper bound for every statement, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ConnectionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            username: default_username(),
            password: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
