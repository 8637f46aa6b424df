//! The dashboard pipeline: load → select → aggregate → render
//!
//! One pipeline serves both data sources. The source is picked once at
//! startup; everything after loading is identical.

use nci_graph::{RemoteClient, Session};
use std::sync::Arc;
use tracing::info;

use crate::chart::{render, RenderedChart, Visualization};
use crate::config::{DashboardConfig, SourceConfig};
use crate::data::{CachedSource, ComplaintRecord, ComplaintTable, DataSource, FileSource, GraphSource};
use crate::error::{NciError, NciResult};
use crate::export::{export_csv, export_file_name};
use crate::filter::filter;
use crate::graph_query::{GraphEdge, GraphQueryAdapter};
use crate::network::NodeLinkGraph;

/// A CSV download: suggested file name and contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub body: String,
}

pub struct Dashboard {
    source: CachedSource,
    graph: Option<GraphQueryAdapter>,
}

impl Dashboard {
    /// Dashboard over `source`, without a graph view
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self {
            source: CachedSource::new(source),
            graph: None,
        }
    }

    /// Enable the zip graph view on an open session
    pub fn with_graph(mut self, session: Arc<Session>) -> Self {
        self.graph = Some(GraphQueryAdapter::new(session));
        self
    }

    /// Build from configuration. Opens the graph session when one is
    /// configured; an unreachable store fails here.
    pub async fn from_config(config: &DashboardConfig) -> NciResult<Self> {
        config.validate()?;

        let session = match config.graph_connection() {
            Some(conn) => {
                let client = RemoteClient::new(&conn)?;
                Some(Arc::new(Session::open(Arc::new(client), conn.timeout()).await?))
            }
            None => None,
        };

        let source: Box<dyn DataSource> = match (&config.source, &session) {
            (SourceConfig::File { path }, _) => Box::new(FileSource::new(path.clone())),
            (SourceConfig::Graph, Some(session)) => Box::new(GraphSource::new(session.clone())),
            (SourceConfig::Graph, None) => {
                return Err(NciError::Config("graph source without graph connection".to_string()));
            }
        };

        let dashboard = Self::new(source);
        Ok(match session {
            Some(session) => dashboard.with_graph(session),
            None => dashboard,
        })
    }

    /// The memoized table
    pub async fn table(&self) -> NciResult<ComplaintTable> {
        self.source.table().await
    }

    /// Selectable zips, ascending
    pub async fn zip_codes(&self) -> NciResult<Vec<String>> {
        Ok(self.table().await?.zip_codes())
    }

    /// Records of the selected zip
    pub async fn records(&self, key: &str) -> NciResult<Vec<ComplaintRecord>> {
        let table = self.table().await?;
        let view = filter(&table, key);
        Ok(view.iter().cloned().collect())
    }

    /// Chart for the selected zip
    pub async fn chart(&self, key: &str, viz: Visualization) -> NciResult<RenderedChart> {
        let table = self.table().await?;
        let view = filter(&table, key);
        Ok(render(viz, &view, &table))
    }

    /// Weighted complaint edges of the selected zip
    pub async fn edges(&self, key: &str) -> NciResult<Vec<GraphEdge>> {
        let adapter = self.graph.as_ref().ok_or_else(|| {
            NciError::GraphStoreUnavailable("no graph store configured".to_string())
        })?;
        adapter.query_graph(key).await
    }

    /// Node-link graph of the selected zip
    pub async fn graph(&self, key: &str) -> NciResult<NodeLinkGraph> {
        let edges = self.edges(key).await?;
        Ok(NodeLinkGraph::from_edges(key, &edges))
    }

    /// The selection as a CSV download
    pub async fn export(&self, key: &str) -> NciResult<Export> {
        let table = self.table().await?;
        let view = filter(&table, key);
        Ok(Export {
            file_name: export_file_name(key),
            body: export_csv(&view)?,
        })
    }

    /// Drop the memoized table so the next request reloads it
    pub async fn reload(&self) {
        self.source.invalidate().await;
        info!("Dashboard data will be reloaded from {}", self.source.describe());
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }

    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }
}
