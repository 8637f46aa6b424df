//! MemoryClient — in-process complaint graph
//!
//! Holds zip → complaint type relationships in memory and answers the
//! statements in [`crate::queries`] without a server.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::client::GraphClient;
use crate::error::{GraphError, GraphResult};
use crate::models::{Params, QueryResult};
use crate::queries;

#[derive(Debug, Clone)]
struct HasComplaint {
    zip: String,
    complaint_type: String,
    count: u64,
}

/// In-process client over a fixed complaint graph.
///
/// Only the statements in [`crate::queries`] are understood; anything else
/// fails with `GraphError::QueryError`.
#[derive(Debug, Default)]
pub struct MemoryClient {
    edges: Vec<HasComplaint>,
    boroughs: HashMap<String, String>,
    unreachable: bool,
    closed: AtomicBool,
}

impl MemoryClient {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose store can never be reached
    pub fn unreachable() -> Self {
        Self { unreachable: true, ..Self::default() }
    }

    /// Add `(zip)-[:HAS_COMPLAINT {count}]->(complaint_type)`
    pub fn with_complaint(mut self, zip: &str, complaint_type: &str, count: u64) -> Self {
        self.edges.push(HasComplaint {
            zip: zip.to_string(),
            complaint_type: complaint_type.to_string(),
            count,
        });
        self
    }

    /// Add `(zip)-[:LOCATED_IN]->(borough)`
    pub fn with_borough(mut self, zip: &str, borough: &str) -> Self {
        self.boroughs.insert(zip.to_string(), borough.to_string());
        self
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn check_open(&self) -> GraphResult<()> {
        if self.unreachable {
            return Err(GraphError::ConnectionError("in-memory store marked unreachable".to_string()));
        }
        if self.is_closed() {
            return Err(GraphError::Closed);
        }
        Ok(())
    }

    fn all_complaints(&self) -> QueryResult {
        let mut result = QueryResult::new(columns(&["zip", "complaint_type", "borough", "count"]));
        for edge in &self.edges {
            let borough = self.boroughs.get(&edge.zip)
                .map(|b| json!(b))
                .unwrap_or(serde_json::Value::Null);
            result.records.push(vec![
                json!(edge.zip),
                json!(edge.complaint_type),
                borough,
                json!(edge.count),
            ]);
        }
        result
    }

    fn zip_complaints(&self, params: &Params) -> GraphResult<QueryResult> {
        let zip = params.get("zip")
            .and_then(|v| v.as_str())
            .ok_or_else(|| GraphError::QueryError("expected parameter $zip".to_string()))?;

        let mut matching: Vec<&HasComplaint> = self.edges.iter()
            .filter(|e| e.zip == zip)
            .collect();
        matching.sort_by(|a, b| b.count.cmp(&a.count));

        let mut result = QueryResult::new(columns(&["zip", "complaint", "count"]));
        for edge in matching {
            result.records.push(vec![json!(edge.zip), json!(edge.complaint_type), json!(edge.count)]);
        }
        Ok(result)
    }
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[async_trait]
impl GraphClient for MemoryClient {
    async fn run(&self, cypher: &str, params: Params) -> GraphResult<QueryResult> {
        self.check_open()?;
        match cypher {
            queries::ALL_COMPLAINTS => Ok(self.all_complaints()),
            queries::ZIP_COMPLAINTS => self.zip_complaints(&params),
            queries::PING => Ok(QueryResult {
                columns: columns(&["ok"]),
                records: vec![vec![json!(1)]],
            }),
            other => Err(GraphError::QueryError(
                format!("statement not supported in memory: {}", other.lines().next().unwrap_or(""))
            )),
        }
    }

    async fn ping(&self) -> GraphResult<()> {
        self.check_open()
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn describe(&self) -> String {
        format!("in-memory graph ({} relationships)", self.edges.len())
    }
}
