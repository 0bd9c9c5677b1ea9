use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tinylink_core::{Result, StorageError, UrlRepository};

/// In-memory implementation of the repository contract, keyed by alias.
///
/// DashMap's entry API gives the same atomic reject-on-duplicate
/// behavior the database constraint provides, so the concurrency
/// properties of `save_url` can be exercised without a server. Ids are
/// drawn from an atomic sequence starting at 1, matching the backend's
/// strictly-positive, strictly-increasing contract.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    urls: DashMap<String, StoredUrl>,
    next_id: AtomicI64,
}

#[derive(Debug, Clone)]
struct StoredUrl {
    id: i64,
    #[allow(dead_code)]
    url: String,
}

impl InMemoryStorage {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[async_trait]
impl UrlRepository for InMemoryStorage {
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64> {
        match self.urls.entry(alias.to_string()) {
            Entry::Occupied(_) => Err(StorageError::AliasExists(alias.to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                slot.insert(StoredUrl {
                    id,
                    url: url.to_string(),
                });
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn save_returns_increasing_ids() {
        let store = InMemoryStorage::new();

        let first = store.save_url("https://example.com", "ex").await.unwrap();
        let second = store.save_url("https://example.org", "ex2").await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert!(second > first);
    }

    #[tokio::test]
    async fn duplicate_alias_is_rejected() {
        let store = InMemoryStorage::new();

        store.save_url("https://google.com", "google").await.unwrap();

        let err = store
            .save_url("https://not-google.com", "google")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::AliasExists(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_distinct_aliases_all_succeed() {
        let store = Arc::new(InMemoryStorage::new());
        let mut handles = vec![];

        for i in 0..32u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .save_url(&format!("https://example{i}.com"), &format!("alias-{i:03}"))
                    .await
                    .unwrap()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }

        assert_eq!(ids.len(), 32);
        assert_eq!(store.len(), 32);
    }

    #[tokio::test]
    async fn concurrent_same_alias_yields_one_success() {
        let store = Arc::new(InMemoryStorage::new());
        let mut handles = vec![];

        for i in 0..16u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .save_url(&format!("https://example{i}.com"), "contended")
                    .await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(err) => assert!(matches!(err, StorageError::AliasExists(_))),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }
}
