//! GraphClient trait — the unified interface for remote and in-process modes

use async_trait::async_trait;
use crate::error::GraphResult;
use crate::models::{Params, QueryResult};

/// Unified client interface for the complaint graph store.
///
/// Implemented by:
/// - `RemoteClient` — Neo4j over HTTP
/// - `MemoryClient` — in-process, no network (for tests and demos)
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Execute a read-only Cypher statement with parameters
    async fn run(&self, cypher: &str, params: Params) -> GraphResult<QueryResult>;

    /// Check that the store is reachable
    async fn ping(&self) -> GraphResult<()>;

    /// Release the underlying connection. Later calls fail with `GraphError::Closed`.
    fn close(&self);

    /// Short human-readable description of the endpoint
    fn describe(&self) -> String;
}
