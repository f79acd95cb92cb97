//! Update store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which update store backend to use
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Local YAML files, for development
    #[default]
    File,
    /// Qdrant collection over REST
    Qdrant,
}

/// Update store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Selected backend
    #[serde(default)]
    pub backend: StoreBackend,

    /// Base directory for the file backend
    #[serde(default = "default_file_path")]
    pub file_path: String,

    /// Qdrant instance URL
    pub qdrant_url: Option<String>,

    /// Qdrant API key
    pub qdrant_api_key: Option<String>,

    /// Qdrant collection name
    #[serde(default = "default_collection")]
    pub qdrant_collection: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            StoreBackend::File => {
                if self.file_path.trim().is_empty() {
                    return Err(ValidationError::EmptyStorePath);
                }
            }
            StoreBackend::Qdrant => {
                let Some(url) = self.qdrant_url.as_ref().filter(|u| !u.is_empty()) else {
                    return Err(ValidationError::MissingRequired("STORE__QDRANT_URL"));
                };
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ValidationError::InvalidQdrantUrl);
                }
            }
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            file_path: default_file_path(),
            qdrant_url: None,
            qdrant_api_key: None,
            qdrant_collection: default_collection(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_file_path() -> String {
    "./data/updates".to_string()
}

fn default_collection() -> String {
    "one-on-ones".to_string()
}

fn default_timeout() -> u64 {
    30
}
