//! RemoteClient — network client for a running Neo4j server
//!
//! Speaks the Neo4j HTTP transactional API: every statement is sent as a
//! single auto-committed transaction to `/db/{database}/tx/commit`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::RwLock;
use tracing::debug;

use crate::client::GraphClient;
use crate::error::{GraphError, GraphResult};
use crate::models::{ConnectionConfig, Params, QueryResult};
use crate::queries;

#[derive(Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Deserialize)]
struct TxResult {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Deserialize)]
struct TxRow {
    row: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// Network client that connects to a running Neo4j server.
pub struct RemoteClient {
    commit_url: String,
    username: String,
    password: Option<String>,
    /// `None` once closed; dropping the client releases pooled connections.
    http_client: RwLock<Option<Client>>,
}

impl RemoteClient {
    /// Create a new RemoteClient from connection settings.
    ///
    /// No request is sent here; use `Session::open` to verify reachability.
    ///
    /// # Example
    /// ```no_run
    /// # use nci_graph::{ConnectionConfig, RemoteClient};
    /// let client = RemoteClient::new(&ConnectionConfig::default()).unwrap();
    /// ```
    pub fn new(config: &ConnectionConfig) -> GraphResult<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GraphError::ConnectionError(e.to_string()))?;

        Ok(Self {
            commit_url: format!(
                "{}/db/{}/tx/commit",
                config.uri.trim_end_matches('/'),
                config.database
            ),
            username: config.username.clone(),
            password: config.password.clone(),
            http_client: RwLock::new(Some(http_client)),
        })
    }

    fn client(&self) -> GraphResult<Client> {
        let guard = self.http_client.read().unwrap_or_else(|e| e.into_inner());
        guard.clone().ok_or(GraphError::Closed)
    }

    /// Execute a POST request to the transactional commit endpoint
    async fn post_statement(&self, cypher: &str, params: Params) -> GraphResult<QueryResult> {
        let client = self.client()?;
        let body = serde_json::json!({
            "statements": [{ "statement": cypher, "parameters": params }]
        });

        let response = client.post(&self.commit_url)
            .basic_auth(&self.username, self.password.as_deref())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GraphError::ConnectionError(
                format!("authentication failed for user '{}'", self.username)
            ));
        }
        if !status.is_success() {
            return Err(GraphError::ConnectionError(
                format!("{} returned {}", self.commit_url, status)
            ));
        }

        let tx: TxResponse = response.json().await?;
        if let Some(err) = tx.errors.first() {
            return Err(GraphError::QueryError(format!("{}: {}", err.code, err.message)));
        }

        let result = tx.results.into_iter().next().ok_or_else(|| {
            GraphError::UnexpectedResult("response carried no statement result".to_string())
        })?;

        debug!(rows = result.data.len(), "statement committed");
        Ok(QueryResult {
            columns: result.columns,
            records: result.data.into_iter().map(|r| r.row).collect(),
        })
    }
}

#[async_trait]
impl GraphClient for RemoteClient {
    async fn run(&self, cypher: &str, params: Params) -> GraphResult<QueryResult> {
        self.post_statement(cypher, params).await
    }

    async fn ping(&self) -> GraphResult<()> {
        self.post_statement(queries::PING, Params::new()).await?;
        Ok(())
    }

    fn close(&self) {
        let mut guard = self.http_client.write().unwrap_or_else(|e| e.into_inner());
        guard.take();
    }

    fn describe(&self) -> String {
        self.commit_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_url() {
        let config = ConnectionConfig {
            uri: "http://graph.local:7474/".to_string(),
            database: "complaints".to_string(),
            ..ConnectionConfig::default()
        };
        let client = RemoteClient::new(&config).unwrap();
        assert_eq!(client.describe(), "http://graph.local:7474/db/complaints/tx/commit");
    }

    #[tokio::test]
    async fn test_closed_client_refuses_statements() {
        let client = RemoteClient::new(&ConnectionConfig::default()).unwrap();
        client.close();
        let err = client.run(queries::PING, Params::new()).await.unwrap_err();
        assert!(matches!(err, GraphError::Closed));
    }

    #[test]
    fn test_parse_transaction_response() {
        let body = r#"{
            "results": [{"columns": ["zip", "complaint", "count"],
                         "data": [{"row": ["10001", "Noise", 7], "meta": [null, null, null]}]}],
            "errors": []
        }"#;
        let tx: TxResponse = serde_json::from_str(body).unwrap();
        assert!(tx.errors.is_empty());
        assert_eq!(tx.results[0].columns.len(), 3);
        assert_eq!(tx.results[0].data[0].row[2], serde_json::json!(7));
    }
}
