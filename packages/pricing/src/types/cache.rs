//! Cache key and entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;
use super::query::ProductType;

/// Cache key: `(product_type, query_text)`, exact string match,
/// case-sensitive as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub product_type: ProductType,
    pub query_text: String,
}

impl CacheKey {
    pub fn new(product_type: ProductType, query_text: impl Into<String>) -> Self {
        Self {
            product_type,
            query_text: query_text.into(),
        }
    }
}

/// A cached analysis with its expiration timestamp.
///
/// Entries are superseded (last-write-wins) rather than deleted, and are
/// never proactively evicted; the pipeline checks `expires_at` at read
/// time via [`is_fresh`](CacheEntry::is_fresh).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub result: AnalysisResult,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(result: AnalysisResult, expires_at: DateTime<Utc>) -> Self {
        Self { result, expires_at }
    }

    /// Whether the entry is still servable at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cache_key_is_case_sensitive() {
        let a = CacheKey::new(ProductType::Card, "PSA 10 Matthews");
        let b = CacheKey::new(ProductType::Card, "psa 10 matthews");
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_text_different_product_is_a_different_key() {
        let a = CacheKey::new(ProductType::Card, "query");
        let b = CacheKey::new(ProductType::Laptop, "query");
        assert_ne!(a, b);
    }

    #[test]
    fn test_freshness_is_strictly_after_now() {
        let now = Utc::now();
        let result = crate::testing::sample_analysis(crate::types::Currency::Usd);

        let fresh = CacheEntry::new(result.clone(), now + Duration::hours(1));
        assert!(fresh.is_fresh(now));

        let expired = CacheEntry::new(result.clone(), now - Duration::seconds(1));
        assert!(!expired.is_fresh(now));

        let boundary = CacheEntry::new(result, now);
        assert!(!boundary.is_fresh(now));
    }
}
