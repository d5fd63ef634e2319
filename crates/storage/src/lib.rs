//! Storage layer: the per-date comment store.
//!
//! Comments live in a single JSON object keyed by `YYYY-MM-DD`. Every
//! mutation rewrites the whole document; there is no locking, so two
//! overlapping upserts are last-writer-wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// Date string -> comment text.
pub type Comments = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing date")]
    MissingDate,
    #[error("comment file {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode comments: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait::async_trait]
pub trait CommentStore: Send + Sync {
    async fn load(&self) -> Result<Comments, StorageError>;

    async fn save(&self, comments: &Comments) -> Result<(), StorageError>;

    /// Sets the comment for `date`, replacing any previous one.
    async fn upsert(&self, date: &str, text: &str) -> Result<(), StorageError> {
        if date.is_empty() {
            return Err(StorageError::MissingDate);
        }
        let mut comments = self.load().await?;
        comments.insert(date.to_string(), text.to_string());
        self.save(&comments).await
    }
}

/// Comments persisted as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait::async_trait]
impl CommentStore for JsonFileStore {
    async fn load(&self) -> Result<Comments, StorageError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no comment file at {:?}", self.path);
                return Ok(Comments::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_slice(&raw).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, comments: &Comments) -> Result<(), StorageError> {
        let body = serde_json::to_string_pretty(comments)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        // Plain overwrite, not atomic.
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| self.io_error(e))
    }
}

/// In-process store, used where a file would only get in the way.
#[derive(Debug, Default)]
pub struct MemoryStore {
    comments: Mutex<Comments>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(comments: Comments) -> Self {
        Self {
            comments: Mutex::new(comments),
        }
    }
}

#[async_trait::async_trait]
impl CommentStore for MemoryStore {
    async fn load(&self) -> Result<Comments, StorageError> {
        Ok(self.comments.lock().await.clone())
    }

    async fn save(&self, comments: &Comments) -> Result<(), StorageError> {
        *self.comments.lock().await = comments.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_upsert_overwrites() {
        let store = MemoryStore::new();
        store.upsert("2024-05-01", "first").await.unwrap();
        store.upsert("2024-05-01", "second").await.unwrap();
        let comments = store.load().await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments["2024-05-01"], "second");
    }

    #[tokio::test]
    async fn empty_date_is_rejected_before_load() {
        let mut seed = Comments::new();
        seed.insert("2024-05-01".into(), "keep".into());
        let store = MemoryStore::with_comments(seed.clone());
        let err = store.upsert("", "text").await.unwrap_err();
        assert!(matches!(err, StorageError::MissingDate));
        assert_eq!(store.load().await.unwrap(), seed);
    }

    #[tokio::test]
    async fn empty_text_is_stored() {
        let store = MemoryStore::new();
        store.upsert("2024-05-01", "").await.unwrap();
        assert_eq!(store.load().await.unwrap()["2024-05-01"], "");
    }
}
