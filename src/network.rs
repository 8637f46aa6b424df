//! Node-link shape of a zip's complaint graph
//!
//! Two tiers: the selected zip is the root, each distinct complaint type is
//! a leaf. Layout is left to the browser.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::graph_query::GraphEdge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Zip,
    ComplaintType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    /// Drawn as line width
    pub weight: u64,
    /// Hover text
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLinkGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl NodeLinkGraph {
    /// Root plus one leaf per distinct target. Repeated targets are merged
    /// and their weights added. Without edges the graph is the root alone.
    pub fn from_edges(key: &str, edges: &[GraphEdge]) -> Self {
        let root_id = format!("zip:{}", key);
        let mut weights: IndexMap<&str, u64> = IndexMap::new();
        for edge in edges {
            *weights.entry(edge.target.as_str()).or_insert(0) += edge.weight;
        }

        let mut nodes = vec![GraphNode {
            id: root_id.clone(),
            label: key.to_string(),
            kind: NodeKind::Zip,
        }];
        let mut links = Vec::with_capacity(weights.len());

        for (target, weight) in weights {
            let id = format!("complaint:{}", target);
            nodes.push(GraphNode {
                id: id.clone(),
                label: target.to_string(),
                kind: NodeKind::ComplaintType,
            });
            links.push(GraphLink {
                source: root_id.clone(),
                target: id,
                weight,
                title: format!("{} complaints", weight),
            });
        }

        Self { nodes, links }
    }

    /// Only the root node is present
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
