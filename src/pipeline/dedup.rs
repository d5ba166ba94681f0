// src/pipeline/dedup.rs

//! Two-tier deduplication store.
//!
//! The local tier is the history snapshot loaded at start and extended in
//! memory during the run. The remote tier is the registration API's existence
//! check, which falls back to the local tier when the call fails.

use std::collections::HashSet;

use crate::error::Result;
use crate::services::LinkRegistry;
use crate::storage::HistoryStorage;

/// Set of already-processed dedup keys.
///
/// Keys keep their insertion order so the persisted snapshot is stable.
#[derive(Debug, Default, Clone)]
pub struct DedupStore {
    keys: Vec<String>,
    index: HashSet<String>,
    dirty: bool,
}

impl DedupStore {
    /// Build a store from an existing snapshot. The store starts clean.
    pub fn from_keys(keys: impl IntoIterator<Item = String>) -> Self {
        let mut store = Self::default();
        for key in keys {
            store.mark_seen(&key);
        }
        store.dirty = false;
        store
    }

    /// Load the snapshot `name` from storage.
    ///
    /// A missing or unreadable snapshot yields an empty store.
    pub async fn load(storage: &dyn HistoryStorage, name: &str) -> Self {
        match storage.load_history(name).await {
            Ok(Some(keys)) => {
                let store = Self::from_keys(keys);
                log::info!("Loaded {} processed posts from {}", store.len(), name);
                store
            }
            Ok(None) => {
                log::info!("No history at {}, starting empty", name);
                Self::default()
            }
            Err(e) => {
                log::error!("Failed to read history {}: {}. Starting empty", name, e);
                Self::default()
            }
        }
    }

    pub fn seen_locally(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// Add `key`. Returns `true` if it was not present before.
    pub fn mark_seen(&mut self, key: &str) -> bool {
        if self.index.contains(key) {
            return false;
        }
        self.index.insert(key.to_string());
        self.keys.push(key.to_string());
        self.dirty = true;
        true
    }

    /// Ask the registry whether `key` exists, falling back to local knowledge
    /// when the call fails.
    pub async fn exists_remotely(&self, key: &str, registry: &dyn LinkRegistry) -> bool {
        match registry.exists(key).await {
            Ok(exists) => exists,
            Err(e) => {
                log::warn!("Existence check failed for {}: {}", key, e);
                self.seen_locally(key)
            }
        }
    }

    /// Whether keys were added since load or the last persist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Write the full key set if anything was added. Returns whether a write
    /// happened.
    pub async fn persist(&mut self, storage: &dyn HistoryStorage, name: &str) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        storage.save_history(name, &self.keys).await?;
        self.dirty = false;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::error::AppError;
    use crate::models::LinkPayload;
    use crate::services::RegisterOutcome;
    use crate::storage::LocalStorage;

    struct FailingRegistry;

    #[async_trait]
    impl LinkRegistry for FailingRegistry {
        async fn exists(&self, url: &str) -> Result<bool> {
            Err(AppError::transport(url, "connection refused"))
        }

        async fn register(&self, _payload: &LinkPayload) -> RegisterOutcome {
            RegisterOutcome::Failed("unreachable".to_string())
        }
    }

    struct KnownRegistry(&'static str);

    #[async_trait]
    impl LinkRegistry for KnownRegistry {
        async fn exists(&self, url: &str) -> Result<bool> {
            Ok(url == self.0)
        }

        async fn register(&self, _payload: &LinkPayload) -> RegisterOutcome {
            RegisterOutcome::Registered
        }
    }

    #[test]
    fn test_mark_seen_is_idempotent() {
        let mut store = DedupStore::default();
        assert!(store.mark_seen("a"));
        assert!(!store.mark_seen("a"));
        assert_eq!(store.keys(), ["a".to_string()]);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_from_keys_is_clean_and_deduplicated() {
        let store = DedupStore::from_keys(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(store.len(), 2);
        assert!(!store.is_dirty());
        assert!(store.seen_locally("b"));
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local() {
        let store = DedupStore::from_keys(vec!["known".to_string()]);
        for key in ["known", "unknown"] {
            assert_eq!(
                store.exists_remotely(key, &FailingRegistry).await,
                store.seen_locally(key)
            );
        }
    }

    #[tokio::test]
    async fn test_remote_answer_is_used() {
        let store = DedupStore::default();
        assert!(store.exists_remotely("remote", &KnownRegistry("remote")).await);
        assert!(!store.exists_remotely("other", &KnownRegistry("remote")).await);
    }

    #[tokio::test]
    async fn test_load_corrupt_snapshot_resets() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("h.json"), "[1, 2").unwrap();
        let storage = LocalStorage::new(tmp.path());

        let store = DedupStore::load(&storage, "h.json").await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_persist_only_when_dirty() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let mut store = DedupStore::load(&storage, "h.json").await;
        assert!(!store.persist(&storage, "h.json").await.unwrap());
        assert!(!storage.path("h.json").exists());

        store.mark_seen("k1");
        assert!(store.persist(&storage, "h.json").await.unwrap());

        let reloaded = DedupStore::load(&storage, "h.json").await;
        assert_eq!(reloaded.keys(), ["k1".to_string()]);
        assert!(!store.persist(&storage, "h.json").await.unwrap());
    }
}
