//! Qdrant-backed update store.
//!
//! Upserts each finished update as a payload-only point in a Qdrant
//! collection, keyed by user and week in the payload. The collection is
//! expected to be created without dense vectors; a separate indexing job
//! embeds the stored text for retrieval.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use uuid::Uuid;

use crate::ports::{UpdateRecord, UpdateStore, UpdateStoreError};

/// Configuration for the Qdrant store.
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    /// Base URL of the Qdrant instance.
    pub base_url: String,
    /// API key, if the instance requires one.
    api_key: Option<Secret<String>>,
    /// Collection updates are written to.
    pub collection: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl QdrantConfig {
    /// Creates a configuration for the given instance URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            collection: "one-on-ones".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// Update store writing to a Qdrant collection over REST.
pub struct QdrantUpdateStore {
    config: QdrantConfig,
    client: Client,
}

impl QdrantUpdateStore {
    /// Creates a store with the given configuration.
    pub fn new(config: QdrantConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn upsert_url(&self) -> String {
        format!(
            "{}/collections/{}/points?wait=true",
            self.config.base_url.trim_end_matches('/'),
            self.config.collection
        )
    }

    fn to_upsert_body(record: &UpdateRecord) -> UpsertPoints {
        UpsertPoints {
            points: vec![Point {
                id: Uuid::new_v4(),
                payload: PointPayload {
                    user: record.user_email.clone(),
                    week: record.week.to_string(),
                    content: record.summary.clone(),
                },
            }],
        }
    }
}

#[async_trait]
impl UpdateStore for QdrantUpdateStore {
    async fn persist(&self, record: &UpdateRecord) -> Result<(), UpdateStoreError> {
        let mut request = self
            .client
            .put(self.upsert_url())
            .header("Content-Type", "application/json")
            .json(&Self::to_upsert_body(record));

        if let Some(key) = self.config.api_key() {
            request = request.header("api-key", key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                UpdateStoreError::Timeout {
                    timeout_secs: self.config.timeout.as_secs() as u32,
                }
            } else {
                UpdateStoreError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(UpdateStoreError::Rejected(format!(
            "status {}: {}",
            status, body
        )))
    }
}

#[derive(Debug, Serialize)]
struct UpsertPoints {
    points: Vec<Point>,
}

#[derive(Debug, Serialize)]
struct Point {
    id: Uuid,
    payload: PointPayload,
}

#[derive(Debug, Serialize)]
struct PointPayload {
    user: String,
    week: String,
    content: String,
}
