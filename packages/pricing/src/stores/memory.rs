//! In-memory storage implementation for testing and single-process use.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::traits::store::{HistoryLog, ResultCache};
use crate::types::{AnalysisResult, CacheEntry, CacheKey, HistoryRecord};

/// In-memory cache + history log.
///
/// Useful for testing and single-process deployments. Data is lost on
/// restart; use the `postgres` feature for durable storage.
pub struct MemoryStore {
    cache: RwLock<HashMap<CacheKey, CacheEntry>>,
    history: RwLock<Vec<HistoryRecord>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Number of cached analyses (fresh and expired).
    pub fn cached_count(&self) -> usize {
        self.cache.read().unwrap().len()
    }

    /// Number of history records.
    pub fn history_count(&self) -> usize {
        self.history.read().unwrap().len()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.cache.write().unwrap().clear();
        self.history.write().unwrap().clear();
    }
}

#[async_trait]
impl ResultCache for MemoryStore {
    async fn lookup(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        Ok(self.cache.read().unwrap().get(key).cloned())
    }

    async fn store(&self, key: &CacheKey, result: &AnalysisResult, ttl: Duration) -> Result<()> {
        let entry = CacheEntry::new(result.clone(), Utc::now() + ttl);
        self.cache.write().unwrap().insert(key.clone(), entry);
        Ok(())
    }
}

#[async_trait]
impl HistoryLog for MemoryStore {
    async fn append(&self, record: &HistoryRecord) -> Result<()> {
        self.history.write().unwrap().push(record.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        let history = self.history.read().unwrap();
        Ok(history.iter().rev().take(limit).cloned().collect())
    }
}
