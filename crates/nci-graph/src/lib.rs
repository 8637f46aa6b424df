//! NCI Graph — graph store access for the Neighborhood Complaint Index
//!
//! Provides two client implementations:
//!
//! - **`RemoteClient`** — Talks to a Neo4j server over its HTTP transactional
//!   endpoint. For production dashboards.
//!
//! - **`MemoryClient`** — In-process, no network. Holds a small complaint graph
//!   and answers the fixed statements in [`queries`]. Ideal for tests and
//!   offline demos.
//!
//! Both implement the `GraphClient` trait. Callers do not use a client
//! directly; they open a [`Session`], which pings the store up front, bounds
//! every statement with a timeout and closes the client when dropped.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use nci_graph::{queries, MemoryClient, Params, Session};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = MemoryClient::new()
//!         .with_complaint("10001", "Noise", 12)
//!         .with_borough("10001", "MANHATTAN");
//!
//!     let session = Session::open(Arc::new(client), Duration::from_secs(5))
//!         .await.unwrap();
//!
//!     let result = session.run(queries::ALL_COMPLAINTS, Params::new())
//!         .await.unwrap();
//!     println!("Found {} rows", result.len());
//! }
//! ```

pub mod client;
pub mod error;
pub mod memory;
pub mod models;
pub mod queries;
pub mod remote;
pub mod session;

pub use client::GraphClient;
pub use error::{GraphError, GraphResult};
pub use memory::MemoryClient;
pub use models::{ConnectionConfig, Params, QueryResult, Row};
pub use remote::RemoteClient;
pub use session::Session;
