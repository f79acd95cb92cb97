//! In-memory update store for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{UpdateRecord, UpdateStore, UpdateStoreError};

/// Update store that keeps records in memory.
///
/// Tracks persist attempts separately from stored records so tests can
/// verify the fire-and-forget contract when failure injection is on.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUpdateStore {
    records: Arc<Mutex<Vec<UpdateRecord>>>,
    attempts: Arc<AtomicUsize>,
    failure: Option<String>,
}

impl InMemoryUpdateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every persist call fail with the given message.
    pub fn failing_with(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Returns all stored records.
    pub fn records(&self) -> Vec<UpdateRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Returns how many times persist was called, successful or not.
    pub fn persist_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpdateStore for InMemoryUpdateStore {
    async fn persist(&self, record: &UpdateRecord) -> Result<(), UpdateStoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(UpdateStoreError::Rejected(message.clone()));
        }

        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_persisted_records() {
        let store = InMemoryUpdateStore::new();
        let record = UpdateRecord::new("sam@example.com", "Shipped things.");

        store.persist(&record).await.unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], record);
        assert_eq!(store.persist_attempts(), 1);
    }

    #[tokio::test]
    async fn failure_injection_rejects_but_counts() {
        let store = InMemoryUpdateStore::new().failing_with("disk full");
        let record = UpdateRecord::new("sam@example.com", "Shipped things.");

        let result = store.persist(&record).await;

        assert!(matches!(result, Err(UpdateStoreError::Rejected(_))));
        assert!(store.records().is_empty());
        assert_eq!(store.persist_attempts(), 1);
    }
}
