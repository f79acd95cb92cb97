//! File-based update store.
//!
//! Stores one YAML file per (week, user) under a base directory. Meant for
//! local development and demos; production deployments point the controller
//! at the Qdrant adapter instead.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::ports::{UpdateRecord, UpdateStore, UpdateStoreError};

/// Update store writing YAML files under a base directory.
#[derive(Debug, Clone)]
pub struct FileUpdateStore {
    base_path: PathBuf,
}

impl FileUpdateStore {
    /// Creates a store rooted at the given directory.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileUpdateStore::new("./data/updates");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn week_dir(&self, record: &UpdateRecord) -> PathBuf {
        self.base_path.join(record.week.to_string())
    }

    fn record_path(&self, record: &UpdateRecord) -> PathBuf {
        // Email local parts may contain path-hostile characters.
        let file_stem: String = record
            .user_email
            .chars()
            .map(|c| if c.is_alphanumeric() || matches!(c, '@' | '.' | '-' | '_' | '+') {
                c
            } else {
                '_'
            })
            .collect();
        self.week_dir(record).join(format!("{file_stem}.yaml"))
    }
}

#[async_trait]
impl UpdateStore for FileUpdateStore {
    async fn persist(&self, record: &UpdateRecord) -> Result<(), UpdateStoreError> {
        let dir = self.week_dir(record);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| UpdateStoreError::Io(e.to_string()))?;

        let yaml = serde_yaml::to_string(record)
            .map_err(|e| UpdateStoreError::SerializationFailed(e.to_string()))?;

        fs::write(self.record_path(record), yaml)
            .await
            .map_err(|e| UpdateStoreError::Io(e.to_string()))?;

        Ok(())
    }
}
