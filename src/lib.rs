//! NCI — Neighborhood Complaint Index
//!
//! A read-only analytics dashboard over complaint records, loaded from the
//! cleaned CSV export or live from a Neo4j complaint graph.
//!
//! # Pipeline
//!
//! - **data** — `DataSource` (file or graph) memoized by `CachedSource`
//! - **filter** — records of one selected zip
//! - **aggregate** — counts by category, borough → type breakdown, weekly trend
//! - **chart** — closed dispatch from a `Visualization` to a `RenderedChart`
//! - **graph_query** / **network** — the zip's complaint graph as nodes and links
//! - **export** — the selection as CSV
//! - **dashboard** — the pipeline wired together, used by the HTTP server and CLI
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use nci::aggregate::count_by_category;
//! use nci::data::{ComplaintRecord, ComplaintTable, Field};
//! use nci::filter::filter;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let table = ComplaintTable::new(vec![
//!     ComplaintRecord::new("10001", "Noise", Some("MANHATTAN"), date),
//!     ComplaintRecord::new("10001", "Noise", None, date),
//!     ComplaintRecord::new("10002", "Heat", Some("MANHATTAN"), date),
//! ]);
//!
//! let view = filter(&table, "10001");
//! let counts = count_by_category(&view, Field::ComplaintType);
//! assert_eq!(counts.get("Noise"), Some(2));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod export;
pub mod filter;
pub mod graph_query;
pub mod http;
pub mod network;

// Re-export main types for convenience
pub use aggregate::{AggregationResult, Breakdown, CategoryCount, WeekPoint};
pub use chart::{RenderedChart, Visualization};
pub use config::{DashboardConfig, HttpConfig, SourceConfig};
pub use dashboard::{Dashboard, Export};
pub use data::{ComplaintRecord, ComplaintTable, DataSource, Field, FileSource, GraphSource};
pub use error::{NciError, NciResult};
pub use filter::FilteredView;
pub use graph_query::{GraphEdge, GraphQueryAdapter};
pub use http::server::HttpServer;
pub use network::NodeLinkGraph;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
