//! Update Store Port - Interface for persisting finished updates.
//!
//! One record is written per completed interview, keyed by the user's email
//! and the ISO week bucket. There is no read path here: retrieval belongs to
//! whatever reporting surface consumes the store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, WeekBucket};

/// A finished weekly update ready for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// The user the update belongs to.
    pub user_email: String,
    /// The week the update covers.
    pub week: WeekBucket,
    /// The rendered summary text.
    pub summary: String,
    /// When the interview completed.
    pub saved_at: Timestamp,
}

impl UpdateRecord {
    /// Creates a record stamped with the current time and week.
    pub fn new(user_email: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into(),
            week: WeekBucket::current(),
            summary: summary.into(),
            saved_at: Timestamp::now(),
        }
    }
}

/// Errors that can occur while persisting an update.
#[derive(Debug, thiserror::Error)]
pub enum UpdateStoreError {
    #[error("store rejected the update: {0}")]
    Rejected(String),

    #[error("failed to serialize update: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("store request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

/// Port for the persistence sink.
#[async_trait]
pub trait UpdateStore: Send + Sync {
    /// Persists one finished update.
    ///
    /// # Errors
    ///
    /// Returns `UpdateStoreError` if the sink rejects or cannot reach
    /// storage; callers decide whether that is fatal.
    async fn persist(&self, record: &UpdateRecord) -> Result<(), UpdateStoreError>;
}
