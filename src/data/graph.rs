//! Graph store source
//!
//! Reshapes `(Zip)-[HAS_COMPLAINT]->(ComplaintType)` rows into complaint
//! records, one record per relationship.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use nci_graph::{queries, Params, Session};
use std::sync::Arc;
use tracing::{debug, warn};

use super::source::DataSource;
use super::ComplaintRecord;
use crate::error::{NciError, NciResult};

/// Placeholder creation date for the `row`-th graph row.
///
/// The graph carries no per-complaint timestamp. Rows are dated
/// 2024-01-01, 2024-01-02, ... in result order only so that the weekly
/// trend has something to bucket. These are not event times.
pub fn synthetic_date(row: usize) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 1, 1)?.checked_add_days(Days::new(row as u64))
}

/// Loads complaint records from the graph store
pub struct GraphSource {
    session: Arc<Session>,
}

impl GraphSource {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl DataSource for GraphSource {
    async fn load(&self) -> NciResult<Vec<ComplaintRecord>> {
        let result = self.session.run(queries::ALL_COMPLAINTS, Params::new()).await?;

        let mut records = Vec::with_capacity(result.len());
        let mut total_weight = 0u64;
        let mut blank_zips = 0usize;

        for row in result.rows() {
            let shape = |e: nci_graph::GraphError| NciError::DataLoad(e.to_string());

            let zip = match row.get_opt_string("zip").map_err(shape)? {
                Some(z) if !z.trim().is_empty() => z,
                _ => {
                    blank_zips += 1;
                    continue;
                }
            };
            let complaint_type = row.get_string("complaint_type").map_err(shape)?;
            let borough = row.get_opt_string("borough").map_err(shape)?;
            // Weights are informational here; the per-zip graph query is strict.
            total_weight += row.get("count").and_then(serde_json::Value::as_u64).unwrap_or(0);

            let created_date = synthetic_date(records.len()).ok_or_else(|| {
                NciError::DataLoad(format!("too many graph rows to date ({})", records.len()))
            })?;

            records.push(ComplaintRecord::new(
                zip.trim(),
                complaint_type.trim(),
                borough.as_deref(),
                created_date,
            ));
        }

        if blank_zips > 0 {
            warn!("Skipped {} graph rows without a zip code", blank_zips);
        }
        debug!(rows = records.len(), total_weight, "graph rows reshaped into complaint records");

        Ok(records)
    }

    fn describe(&self) -> String {
        format!("graph {}", self.session.describe())
    }
}
