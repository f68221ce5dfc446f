//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the pricing
//! library without making real listing-source or LLM calls. Mocks share
//! their internal state across clones, so a test can keep a handle for
//! assertions after moving a mock into the pipeline.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{PricingError, Result};
use crate::traits::{CompletionProvider, HistoryLog, ListingSource, ResultCache};
use crate::types::{
    AnalysisResult, CacheEntry, CacheKey, Comp, ConfidenceLabel, Currency, HistoryRecord,
    PriceSummary, RawListing, Region,
};

/// A mock listing source with scripted results per query string.
///
/// Unknown queries return an empty `Vec`, which the pipeline treats as
/// the zero-results condition.
#[derive(Clone, Default)]
pub struct MockListingSource {
    listings: Arc<RwLock<HashMap<String, Vec<RawListing>>>>,
    failure: Arc<RwLock<Option<String>>>,
    calls: Arc<AtomicUsize>,
}

impl MockListingSource {
    /// Create a mock with no scripted results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the listings returned for a query.
    pub fn with_listings(self, query: impl Into<String>, listings: Vec<RawListing>) -> Self {
        self.listings.write().unwrap().insert(query.into(), listings);
        self
    }

    /// Make every call fail with a fetch error carrying this message.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// Number of `sold_listings` calls made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingSource for MockListingSource {
    async fn sold_listings(&self, query: &str, _region: Region) -> Result<Vec<RawListing>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(PricingError::Fetch(message));
        }

        Ok(self
            .listings
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

/// A mock completion provider returning scripted completions in order.
#[derive(Clone, Default)]
pub struct MockCompletionProvider {
    responses: Arc<RwLock<VecDeque<String>>>,
    failure: Arc<RwLock<Option<String>>>,
    calls: Arc<AtomicUsize>,
}

impl MockCompletionProvider {
    /// Create a mock with no scripted completions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a completion to return.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.write().unwrap().push_back(response.into());
        self
    }

    /// Make every call fail with a provider error carrying this message.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// Number of `complete` calls made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, _instructions: &str, _payload: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(PricingError::Llm(message));
        }

        self.responses
            .write()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PricingError::Llm("mock provider has no scripted completion".into()))
    }
}

/// A store whose every operation fails, for persistence-policy tests.
#[derive(Default)]
pub struct FailingStore;

impl FailingStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResultCache for FailingStore {
    async fn lookup(&self, _key: &CacheKey) -> Result<Option<CacheEntry>> {
        Err(PricingError::Persistence("injected cache read failure".into()))
    }

    async fn store(
        &self,
        _key: &CacheKey,
        _result: &AnalysisResult,
        _ttl: chrono::Duration,
    ) -> Result<()> {
        Err(PricingError::Persistence("injected cache write failure".into()))
    }
}

#[async_trait]
impl HistoryLog for FailingStore {
    async fn append(&self, _record: &HistoryRecord) -> Result<()> {
        Err(PricingError::Persistence("injected history failure".into()))
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<HistoryRecord>> {
        Err(PricingError::Persistence("injected history failure".into()))
    }
}

/// A realistic raw listing for tests.
pub fn sample_listing() -> RawListing {
    RawListing::new()
        .with_title("2016-17 Upper Deck Young Guns #201 Auston Matthews RC PSA 10")
        .with_price("$450.00")
        .with_shipping("$15.00")
        .with_location("Toronto, Canada")
        .with_sold_date("Oct 12, 2025")
        .with_link("https://www.ebay.com/itm/1")
        .with_thumbnail("https://i.ebayimg.com/1.jpg")
}

/// A comp that passes contract validation under either region rule.
///
/// Included comps carry no shipping, so item price equals total under
/// both the US and CA composition rules.
pub fn sample_comp(included: bool) -> Comp {
    if included {
        Comp {
            title: "2016-17 Upper Deck Young Guns #201 Auston Matthews RC PSA 10".into(),
            url: Some("https://www.ebay.com/itm/1".into()),
            image_url: Some("https://i.ebayimg.com/1.jpg".into()),
            sold_price: Some("100.00".parse().unwrap()),
            shipping: None,
            location: Some("Toronto, Canada".into()),
            sold_date: Some("Oct 12, 2025".into()),
            total_used: Some("100.00".parse().unwrap()),
            included: true,
            exclusion_reason: None,
            match_score: Some(95),
            extracted_fields: [
                ("player_name".to_string(), serde_json::json!("Auston Matthews")),
                ("grade".to_string(), serde_json::json!("10")),
            ]
            .into_iter()
            .collect(),
        }
    } else {
        Comp {
            title: "Matthews Young Guns reprint lot of 10".into(),
            url: Some("https://www.ebay.com/itm/2".into()),
            image_url: None,
            sold_price: Some("20.00".parse().unwrap()),
            shipping: None,
            location: None,
            sold_date: None,
            total_used: None,
            included: false,
            exclusion_reason: Some("Lot/bundle of reprints".into()),
            match_score: Some(20),
            extracted_fields: Default::default(),
        }
    }
}

/// A minimal analysis that passes contract validation for any region.
pub fn sample_analysis(currency: Currency) -> AnalysisResult {
    AnalysisResult {
        summary: PriceSummary {
            median_price: "100.00".parse().unwrap(),
            p25_price: "100.00".parse().unwrap(),
            p75_price: "100.00".parse().unwrap(),
            currency,
            confidence_score: 82,
            confidence_label: ConfidenceLabel::High,
            comps_used: 1,
            comps_excluded: 1,
            notes: vec!["Single strong comp; thin sample".into()],
        },
        comps: vec![sample_comp(true), sample_comp(false)],
    }
}

/// Serialize an analysis as the completion string a provider would return.
pub fn completion_for(analysis: &AnalysisResult) -> String {
    serde_json::to_string(analysis).expect("analysis serializes")
}
