//! Error taxonomy for the dashboard pipeline
//!
//! Empty results (no records for a zip, no graph edges) are not errors and
//! never surface here.

use nci_graph::GraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NciError {
    /// Missing or malformed source file, or a schema mismatch
    #[error("Data load error: {0}")]
    DataLoad(String),

    /// Connection or query failure against the graph store
    #[error("Graph store unavailable: {0}")]
    GraphStoreUnavailable(String),

    /// A visualization name outside the closed set
    #[error("Unsupported visualization: {0}")]
    UnsupportedVisualization(String),

    /// Missing or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing the CSV export failed
    #[error("Export error: {0}")]
    Export(String),
}

impl From<GraphError> for NciError {
    fn from(e: GraphError) -> Self {
        NciError::GraphStoreUnavailable(e.to_string())
    }
}

pub type NciResult<T> = Result<T, NciError>;
