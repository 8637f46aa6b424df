//! Scoped graph store session
//!
//! A `Session` owns one client for the lifetime of the process. It is
//! verified when opened and closes the client when dropped, so the
//! connection is released on every exit path, including a failed open.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::client::GraphClient;
use crate::error::{GraphError, GraphResult};
use crate::models::{Params, QueryResult};

pub struct Session {
    client: Arc<dyn GraphClient>,
    timeout: Duration,
}

impl Session {
    /// Open a session and ping the store. An unreachable store is an error.
    pub async fn open(client: Arc<dyn GraphClient>, timeout: Duration) -> GraphResult<Self> {
        let session = Self { client, timeout };
        // On failure `session` is dropped here, which closes the client.
        session.bounded(session.client.ping()).await?;
        info!("Graph session opened: {}", session.client.describe());
        Ok(session)
    }

    /// Execute a statement, bounded by the session timeout
    pub async fn run(&self, cypher: &str, params: Params) -> GraphResult<QueryResult> {
        let result = self.bounded(self.client.run(cypher, params)).await?;
        debug!(rows = result.len(), "graph statement returned");
        Ok(result)
    }

    pub fn describe(&self) -> String {
        self.client.describe()
    }

    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = GraphResult<T>>,
    ) -> GraphResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(GraphError::Timeout(self.timeout)),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.client.close();
        info!("Graph session closed: {}", self.client.describe());
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.client.describe())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryClient;
    use crate::queries;
    use async_trait::async_trait;

    struct StalledClient;

    #[async_trait]
    impl GraphClient for StalledClient {
        async fn run(&self, _cypher: &str, _params: Params) -> GraphResult<QueryResult> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(QueryResult::default())
        }

        async fn ping(&self) -> GraphResult<()> {
            Ok(())
        }

        fn close(&self) {}

        fn describe(&self) -> String {
            "stalled".to_string()
        }
    }

    #[tokio::test]
    async fn test_drop_closes_client() {
        let client = Arc::new(MemoryClient::new().with_complaint("10001", "Noise", 1));
        let session = Session::open(client.clone(), Duration::from_secs(1)).await.unwrap();
        assert_eq!(session.run(queries::ALL_COMPLAINTS, Params::new()).await.unwrap().len(), 1);

        drop(session);
        assert!(client.is_closed());
    }

    #[tokio::test]
    async fn test_failed_open_still_closes() {
        let client = Arc::new(MemoryClient::unreachable());
        let err = Session::open(client.clone(), Duration::from_secs(1)).await.unwrap_err();
        assert!(matches!(err, GraphError::ConnectionError(_)));
        assert!(client.is_closed());
    }

    #[tokio::test]
    async fn test_statement_timeout() {
        let session = Session::open(Arc::new(StalledClient), Duration::from_millis(50)).await.unwrap();
        let err = session.run(queries::ALL_COMPLAINTS, Params::new()).await.unwrap_err();
        assert!(matches!(err, GraphError::Timeout(_)));
    }
}
