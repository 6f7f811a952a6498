use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use quicklink_core::error::{Result, StoreError};
use quicklink_core::{Alias, ReadStore, RecordId, TargetUrl, UrlRecord, UrlStore};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// In-memory storage entry for an alias.
#[derive(Debug, Clone)]
struct Entry {
    id: RecordId,
    url: TargetUrl,
}

/// In-memory implementation of the store contract using DashMap.
///
/// Records are keyed by alias, with a secondary index from id to alias for
/// deletion. Alias uniqueness is enforced through the shard-locked entry API,
/// so concurrent saves of the same alias resolve to exactly one winner.
#[derive(Debug)]
pub struct InMemoryStore {
    by_alias: DashMap<String, Entry>,
    by_id: DashMap<RecordId, String>,
    closed: AtomicBool,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_alias: DashMap::with_capacity(capacity),
            by_id: DashMap::with_capacity(capacity),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }

    /// Returns the full record stored under `alias`, if any.
    pub fn record(&self, alias: &Alias) -> Option<UrlRecord> {
        self.by_alias.get(alias.as_str()).map(|entry| UrlRecord {
            id: entry.id,
            alias: alias.clone(),
            url: entry.url.clone(),
        })
    }

    fn ensure_open(&self, op: &'static str) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Connection {
                op,
                message: "store is closed".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadStore for InMemoryStore {
    async fn get(&self, alias: &Alias) -> Result<TargetUrl> {
        const OP: &str = "get";
        self.ensure_open(OP)?;

        self.by_alias
            .get(alias.as_str())
            .map(|entry| entry.url.clone())
            .ok_or_else(|| StoreError::NotFound {
                op: OP,
                alias: alias.to_string(),
            })
    }

    async fn exists(&self, alias: &Alias) -> Result<bool> {
        self.ensure_open("exists")?;
        Ok(self.by_alias.contains_key(alias.as_str()))
    }

    async fn ping(&self) -> Result<()> {
        self.ensure_open("ping")
    }
}

#[async_trait]
impl UrlStore for InMemoryStore {
    async fn save(&self, url: &TargetUrl, alias: &Alias) -> Result<RecordId> {
        const OP: &str = "save";
        self.ensure_open(OP)?;

        match self.by_alias.entry(alias.as_str().to_owned()) {
            MapEntry::Occupied(_) => Err(StoreError::DuplicateAlias {
                op: OP,
                alias: alias.to_string(),
            }),
            MapEntry::Vacant(slot) => {
                let id = RecordId::from_uuid(Uuid::new_v4());
                slot.insert(Entry {
                    id,
                    url: url.clone(),
                });
                self.by_id.insert(id, alias.as_str().to_owned());
                Ok(id)
            }
        }
    }

    async fn delete(&self, id: &RecordId) -> Result<bool> {
        self.ensure_open("delete")?;

        let Some((_, alias)) = self.by_id.remove(id) else {
            return Ok(false);
        };

        Ok(self
            .by_alias
            .remove_if(&alias, |_, entry| entry.id == *id)
            .is_some())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
