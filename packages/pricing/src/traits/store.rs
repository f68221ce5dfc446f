//! Storage traits for cached analyses and the history log.
//!
//! The storage layer is split into focused traits:
//! - `ResultCache`: keyed analysis cache with read-time expiration
//! - `HistoryLog`: append-only audit records
//! - `PricingStore`: composite trait combining both

use async_trait::async_trait;
use chrono::Duration;

use crate::error::Result;
use crate::types::{AnalysisResult, CacheEntry, CacheKey, HistoryRecord};

/// Keyed cache of computed analyses.
///
/// Key uniqueness per `(product_type, query_text)` with last-write-wins
/// semantics: no merge, no versioning. Entries are never proactively
/// evicted; `lookup` returns expired entries and the caller checks
/// [`CacheEntry::is_fresh`] at read time.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Get the current entry for a key, fresh or not.
    async fn lookup(&self, key: &CacheKey) -> Result<Option<CacheEntry>>;

    /// Store a new entry expiring `ttl` from now, superseding any
    /// previous entry for the key.
    async fn store(&self, key: &CacheKey, result: &AnalysisResult, ttl: Duration) -> Result<()>;
}

/// Append-only history of completed pipeline runs.
#[async_trait]
pub trait HistoryLog: Send + Sync {
    /// Append one record.
    async fn append(&self, record: &HistoryRecord) -> Result<()>;

    /// Most recent records, newest first. Read by the reporting surface
    /// only - the pipeline never calls this.
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>>;
}

/// Composite storage trait used by the pipeline.
pub trait PricingStore: ResultCache + HistoryLog {}

// Blanket implementation: anything implementing both traits is a PricingStore
impl<T: ResultCache + HistoryLog> PricingStore for T {}
