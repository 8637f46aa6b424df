//! Per-zip complaint graph from the graph store

use nci_graph::{queries, Params, Session};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::NciResult;

/// `(zip)-[HAS_COMPLAINT {count}]->(complaint type)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

/// Runs the per-zip statement on a shared session.
///
/// Holds no state of its own; every call goes to the store. There is no
/// retry: a failure is returned as `GraphStoreUnavailable`.
#[derive(Debug, Clone)]
pub struct GraphQueryAdapter {
    session: Arc<Session>,
}

impl GraphQueryAdapter {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Edges of `key`, heaviest first. No relationships → empty.
    pub async fn query_graph(&self, key: &str) -> NciResult<Vec<GraphEdge>> {
        let mut params = Params::new();
        params.insert("zip".to_string(), serde_json::Value::String(key.to_string()));

        let result = self.session.run(queries::ZIP_COMPLAINTS, params).await?;

        let mut edges = Vec::with_capacity(result.len());
        for row in result.rows() {
            edges.push(GraphEdge {
                source: row.get_string("zip")?,
                target: row.get_string("complaint")?,
                weight: row.get_u64("count")?,
            });
        }
        edges.sort_by(|a, b| b.weight.cmp(&a.weight));

        debug!(zip = key, edges = edges.len(), "zip graph fetched");
        Ok(edges)
    }
}
