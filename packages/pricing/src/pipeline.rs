//! The pricing pipeline: cache check, fetch, analyze, persist, respond.
//!
//! One run per query, no feedback loops, no shared mutable state beyond
//! the store. The flow suspends at exactly two points: the listing
//! source call and the LLM call. Concurrent identical queries are not
//! coalesced; both will miss the cache, both will fetch and analyze,
//! and the last cache write wins.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::analyzer::CompAnalyzer;
use crate::error::{PricingError, Result};
use crate::prompts;
use crate::rules::DomainRuleSet;
use crate::traits::{ListingSource, PricingStore};
use crate::types::{AnalysisResult, CacheKey, Currency, HistoryRecord, Query, Region};

/// Pipeline configuration, passed in explicitly at construction time.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub region: Region,
    pub currency: Currency,

    /// How long a computed analysis stays servable from cache.
    pub cache_ttl: Duration,
}

impl PipelineConfig {
    /// Create a config with the default one-hour cache TTL.
    pub fn new(region: Region, currency: Currency) -> Self {
        Self {
            region,
            currency,
            cache_ttl: Duration::hours(1),
        }
    }

    /// Override the cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

/// Orchestrates one pricing request end to end.
///
/// State machine per run:
/// `CHECK_CACHE -> (hit: RESPOND) | (miss: FETCH -> ANALYZE -> PERSIST -> RESPOND)`,
/// where `force_refresh` skips `CHECK_CACHE` unconditionally.
pub struct PricingPipeline<L, S>
where
    L: ListingSource,
    S: PricingStore + ?Sized,
{
    source: L,
    analyzer: CompAnalyzer,
    store: Arc<S>,
    config: PipelineConfig,
}

impl<L, S> PricingPipeline<L, S>
where
    L: ListingSource,
    S: PricingStore + ?Sized,
{
    pub fn new(source: L, analyzer: CompAnalyzer, store: Arc<S>, config: PipelineConfig) -> Self {
        Self {
            source,
            analyzer,
            store,
            config,
        }
    }

    /// Run the pipeline for one query.
    pub async fn run(&self, query: &Query) -> Result<AnalysisResult> {
        let key = CacheKey::new(query.product_type, query.text.as_str());

        if !query.force_refresh {
            if let Some(result) = self.check_cache(&key).await {
                return Ok(result);
            }
        }

        let listings = self
            .source
            .sold_listings(&query.text, self.config.region)
            .await?;
        if listings.is_empty() {
            return Err(PricingError::EmptyResults);
        }
        info!(
            count = listings.len(),
            product = %query.product_type,
            "fetched sold listings"
        );

        let rules = DomainRuleSet::for_product(query.product_type);
        let prompt = prompts::build(rules, self.config.currency, self.config.region, &listings);
        let result = self
            .analyzer
            .analyze(&prompt, rules, self.config.currency, self.config.region)
            .await?;

        self.persist(query, &key, &result).await;

        Ok(result)
    }

    /// Read-only cache probe. Expired and absent entries are misses;
    /// a failing store read is logged and treated as a miss.
    async fn check_cache(&self, key: &CacheKey) -> Option<AnalysisResult> {
        match self.store.lookup(key).await {
            Ok(Some(entry)) if entry.is_fresh(Utc::now()) => {
                debug!(query = %key.query_text, "cache hit");
                Some(entry.result)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "cache lookup failed; treating as miss");
                None
            }
        }
    }

    /// Persist the computed result and its history record.
    ///
    /// Persistence failure is non-fatal: the computed price is valid
    /// even when it could not be durably recorded, so failures are
    /// logged at `warn` and the result is still returned.
    async fn persist(&self, query: &Query, key: &CacheKey, result: &AnalysisResult) {
        if let Err(e) = self.store.store(key, result, self.config.cache_ttl).await {
            warn!(error = %e, query = %key.query_text, "cache write failed");
        }

        let record = HistoryRecord::for_run(query, &result.summary);
        if let Err(e) = self.store.append(&record).await {
            warn!(error = %e, query = %key.query_text, "history append failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        completion_for, sample_analysis, sample_listing, FailingStore, MockCompletionProvider,
        MockListingSource,
    };
    use crate::traits::ResultCache;
    use crate::types::ProductType;
    use crate::MemoryStore;

    const QUERY_TEXT: &str = "2016-17 Upper Deck Young Guns #201 PSA 10";

    // Mocks share their call counters across clones, so tests keep a
    // handle to each mock after moving it into the pipeline.
    fn pipeline_with(
        source: MockListingSource,
        provider: MockCompletionProvider,
        store: Arc<MemoryStore>,
    ) -> PricingPipeline<MockListingSource, MemoryStore> {
        PricingPipeline::new(
            source,
            CompAnalyzer::new(Box::new(provider)),
            store,
            PipelineConfig::new(Region::Us, Currency::Usd),
        )
    }

    fn card_query() -> Query {
        Query::new(QUERY_TEXT, ProductType::Card, Region::Us)
    }

    #[tokio::test]
    async fn test_miss_fetches_analyzes_and_persists() {
        let analysis = sample_analysis(Currency::Usd);
        let source = MockListingSource::new().with_listings(QUERY_TEXT, vec![sample_listing()]);
        let provider = MockCompletionProvider::new().with_response(completion_for(&analysis));
        let store = Arc::new(MemoryStore::new());
        let pipeline = pipeline_with(source, provider, store.clone());

        let result = pipeline.run(&card_query()).await.unwrap();

        assert_eq!(result, analysis);
        assert_eq!(store.cached_count(), 1);
        assert_eq!(store.history_count(), 1);
    }

    #[tokio::test]
    async fn test_fresh_hit_is_idempotent_without_further_calls() {
        let analysis = sample_analysis(Currency::Usd);
        let source = MockListingSource::new().with_listings(QUERY_TEXT, vec![sample_listing()]);
        let provider = MockCompletionProvider::new().with_response(completion_for(&analysis));
        let source_calls = source.clone();
        let provider_calls = provider.clone();
        let store = Arc::new(MemoryStore::new());
        let pipeline = pipeline_with(source, provider, store.clone());

        let first = pipeline.run(&card_query()).await.unwrap();
        let second = pipeline.run(&card_query()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source_calls.call_count(), 1);
        assert_eq!(provider_calls.call_count(), 1);
        // Only the first run persists.
        assert_eq!(store.history_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let analysis = sample_analysis(Currency::Usd);
        let source = MockListingSource::new().with_listings(QUERY_TEXT, vec![sample_listing()]);
        let provider = MockCompletionProvider::new().with_response(completion_for(&analysis));
        let source_calls = source.clone();
        let store = Arc::new(MemoryStore::new());

        let key = CacheKey::new(ProductType::Card, QUERY_TEXT);
        store
            .store(&key, &analysis, Duration::hours(-1))
            .await
            .unwrap();

        let pipeline = pipeline_with(source, provider, store.clone());
        pipeline.run(&card_query()).await.unwrap();

        assert_eq!(source_calls.call_count(), 1);
        let entry = store.lookup(&key).await.unwrap().unwrap();
        assert!(entry.is_fresh(Utc::now()));
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_fresh_cache_and_overwrites() {
        let cached = sample_analysis(Currency::Usd);
        let mut recomputed = sample_analysis(Currency::Usd);
        recomputed.summary.confidence_score = 55;

        let source = MockListingSource::new().with_listings(QUERY_TEXT, vec![sample_listing()]);
        let provider = MockCompletionProvider::new().with_response(completion_for(&recomputed));
        let source_calls = source.clone();
        let store = Arc::new(MemoryStore::new());

        let key = CacheKey::new(ProductType::Card, QUERY_TEXT);
        store.store(&key, &cached, Duration::hours(1)).await.unwrap();

        let pipeline = pipeline_with(source, provider, store.clone());
        let result = pipeline
            .run(&card_query().with_force_refresh(true))
            .await
            .unwrap();

        assert_eq!(result.summary.confidence_score, 55);
        assert_eq!(source_calls.call_count(), 1);

        let entry = store.lookup(&key).await.unwrap().unwrap();
        assert_eq!(entry.result.summary.confidence_score, 55);
    }

    #[tokio::test]
    async fn test_zero_listings_is_fatal_and_writes_nothing() {
        let source = MockListingSource::new(); // no listings for any query
        let provider = MockCompletionProvider::new();
        let provider_calls = provider.clone();
        let store = Arc::new(MemoryStore::new());
        let pipeline = pipeline_with(source, provider, store.clone());

        let err = pipeline.run(&card_query()).await.unwrap_err();

        assert!(matches!(err, PricingError::EmptyResults));
        assert_eq!(provider_calls.call_count(), 0);
        assert_eq!(store.cached_count(), 0);
        assert_eq!(store.history_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let source = MockListingSource::new().with_failure("SerpApi error: 503");
        let provider = MockCompletionProvider::new();
        let store = Arc::new(MemoryStore::new());
        let pipeline = pipeline_with(source, provider, store.clone());

        let err = pipeline.run(&card_query()).await.unwrap_err();

        assert!(matches!(err, PricingError::Fetch(_)));
        assert_eq!(store.cached_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_completion_is_fatal_and_writes_nothing() {
        let source = MockListingSource::new().with_listings(QUERY_TEXT, vec![sample_listing()]);
        let provider = MockCompletionProvider::new().with_response("not json");
        let store = Arc::new(MemoryStore::new());
        let pipeline = pipeline_with(source, provider, store.clone());

        let err = pipeline.run(&card_query()).await.unwrap_err();

        assert!(matches!(err, PricingError::AnalysisParse { .. }));
        assert_eq!(store.cached_count(), 0);
        assert_eq!(store.history_count(), 0);
    }

    #[tokio::test]
    async fn test_persistence_failure_still_returns_result() {
        let analysis = sample_analysis(Currency::Usd);
        let source = MockListingSource::new().with_listings(QUERY_TEXT, vec![sample_listing()]);
        let provider = MockCompletionProvider::new().with_response(completion_for(&analysis));
        let store = Arc::new(FailingStore::new());

        let pipeline = PricingPipeline::new(
            source,
            CompAnalyzer::new(Box::new(provider)),
            store,
            PipelineConfig::new(Region::Us, Currency::Usd),
        );

        let result = pipeline.run(&card_query()).await.unwrap();
        assert_eq!(result, analysis);
    }

    #[tokio::test]
    async fn test_cache_read_failure_degrades_to_miss() {
        let analysis = sample_analysis(Currency::Usd);
        let source = MockListingSource::new().with_listings(QUERY_TEXT, vec![sample_listing()]);
        let provider = MockCompletionProvider::new().with_response(completion_for(&analysis));
        let source_calls = source.clone();
        let store = Arc::new(FailingStore::new());

        let pipeline = PricingPipeline::new(
            source,
            CompAnalyzer::new(Box::new(provider)),
            store,
            PipelineConfig::new(Region::Us, Currency::Usd),
        );

        let result = pipeline.run(&card_query()).await.unwrap();
        assert_eq!(result, analysis);
        assert_eq!(source_calls.call_count(), 1);
    }
}
