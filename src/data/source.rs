//! DataSource trait and the memoizing accessor over it

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{ComplaintRecord, ComplaintTable};
use crate::error::NciResult;

/// Something that can produce the complaint table.
///
/// Implemented by:
/// - `FileSource` — the cleaned CSV export
/// - `GraphSource` — the complaint graph, reshaped into rows
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Load every complaint record
    async fn load(&self) -> NciResult<Vec<ComplaintRecord>>;

    /// Short human-readable description of where records come from
    fn describe(&self) -> String;
}

/// Loads the table once and serves it until [`CachedSource::invalidate`].
///
/// A failed load is not cached; the next call tries again.
pub struct CachedSource {
    source: Box<dyn DataSource>,
    cached: RwLock<Option<ComplaintTable>>,
}

impl CachedSource {
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
        }
    }

    /// The memoized table, loading it on first use
    pub async fn table(&self) -> NciResult<ComplaintTable> {
        if let Some(table) = self.cached.read().await.as_ref() {
            debug!("complaint table served from cache");
            return Ok(table.clone());
        }

        let mut guard = self.cached.write().await;
        // Another request may have loaded it while we waited for the lock.
        if let Some(table) = guard.as_ref() {
            return Ok(table.clone());
        }

        let table = ComplaintTable::new(self.source.load().await?);
        info!("Loaded {} complaint records from {}", table.len(), self.source.describe());
        *guard = Some(table.clone());
        Ok(table)
    }

    /// Drop the memoized table; the next access reloads it
    pub async fn invalidate(&self) {
        self.cached.write().await.take();
        info!("Complaint table cache invalidated");
    }

    /// Whether a table is currently memoized
    pub async fn is_loaded(&self) -> bool {
        self.cached.read().await.is_some()
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }
}
