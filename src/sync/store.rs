//! Remote collection store
//!
//! The seam between the dashboard client and whatever holds the records.
//! `HttpStore` talks to the REST endpoints; `MemoryStore` (see `memory`)
//! answers the same paths in process.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::error::{SyncError, SyncResult};

/// Path-addressed JSON store
///
/// Paths are the REST paths of the collection contract, e.g. `/api/tasks`
/// or `/api/tasks/7`. A non-success answer must come back as
/// `SyncError::Remote` carrying the response body.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read a whole collection
    async fn get(&self, path: &str) -> SyncResult<Value>;

    /// Create a record; returns whatever the store answers with
    async fn post(&self, path: &str, body: Value) -> SyncResult<Value>;

    /// Delete a record by path
    async fn delete(&self, path: &str) -> SyncResult<()>;
}

#[async_trait]
impl<S: RemoteStore + ?Sized> RemoteStore for Arc<S> {
    async fn get(&self, path: &str) -> SyncResult<Value> {
        (**self).get(path).await
    }

    async fn post(&self, path: &str, body: Value) -> SyncResult<Value> {
        (**self).post(path, body).await
    }

    async fn delete(&self, path: &str) -> SyncResult<()> {
        (**self).delete(path).await
    }
}

/// Configuration for the HTTP store
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    /// Origin of the REST API (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout_ms: Option<u64>,
}

impl Default for HttpStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_ms: None,
        }
    }
}

/// REST client for the collection endpoints
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    /// Create a new HTTP store. Every request declares a JSON content type.
    pub fn new(config: &HttpStoreConfig) -> SyncResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request, turning any non-success status into `SyncError::Remote`
    async fn send(&self, request: RequestBuilder) -> SyncResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else {
            tracing::debug!(status = status.as_u16(), body = %text, "Store rejected request");
            Err(SyncError::Remote {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

fn parse_body(text: &str) -> SyncResult<Value> {
    if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        Ok(serde_json::from_str(text)?)
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn get(&self, path: &str) -> SyncResult<Value> {
        let text = self.send(self.client.get(self.url(path))).await?;
        parse_body(&text)
    }

    async fn post(&self, path: &str, body: Value) -> SyncResult<Value> {
        let text = self
            .send(self.client.post(self.url(path)).body(body.to_string()))
            .await?;
        parse_body(&text)
    }

    async fn delete(&self, path: &str) -> SyncResult<()> {
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }
}
