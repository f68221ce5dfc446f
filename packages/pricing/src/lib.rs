//! Comp-Based Market Pricing Library
//!
//! Turns a free-text product query into a defensible market price:
//! fetch recently sold marketplace listings, have a language model
//! classify each one and extract structured attributes, filter out
//! non-comparables, and aggregate the rest into a price distribution
//! with a confidence rating.
//!
//! # Design
//!
//! - Domain rules are data, not control flow: each product type is a
//!   static [`rules::DomainRuleSet`] rendered into the prompt and
//!   enforced on the model's output.
//! - Collaborators sit behind traits at every seam: the listing index
//!   ([`ListingSource`]), the LLM backend ([`CompletionProvider`]), and
//!   persistence ([`ResultCache`] / [`HistoryLog`]).
//! - The model aggregates under a strict schema; [`CompAnalyzer`]
//!   rejects any completion that breaks the contract, whole.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pricing::{
//!     providers, CompAnalyzer, MemoryStore, PipelineConfig, PricingPipeline,
//!     ProductType, Query, Region, SerpApiListingSource,
//! };
//!
//! let settings = pricing::AppSettings::from_env();
//! let source = SerpApiListingSource::new(settings.serpapi_key.clone());
//! let provider = providers::provider_for(settings.llm_provider, &settings.llm_api_key);
//! let store = Arc::new(MemoryStore::new());
//!
//! let pipeline = PricingPipeline::new(
//!     source,
//!     CompAnalyzer::new(provider),
//!     store,
//!     PipelineConfig::new(settings.default_region, settings.default_currency),
//! );
//!
//! let query = Query::new("2016-17 UD Young Guns #201 PSA 10", ProductType::Card, Region::Ca);
//! let analysis = pipeline.run(&query).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (ListingSource, CompletionProvider, stores)
//! - [`types`] - Domain data types
//! - [`rules`] - Per-domain rule sets as static data
//! - [`prompts`] - Deterministic prompt construction
//! - [`analyzer`] - Completion parsing and contract validation
//! - [`providers`] - LLM provider adapters
//! - [`sources`] - Listing source implementations
//! - [`stores`] - Storage implementations (MemoryStore, PostgresStore)
//! - [`pipeline`] - Request orchestration
//! - [`settings`] - Runtime configuration and the masking/merge transforms
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod analyzer;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod rules;
pub mod security;
pub mod settings;
pub mod sources;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use analyzer::CompAnalyzer;
pub use error::{PricingError, Result};
pub use pipeline::{PipelineConfig, PricingPipeline};
pub use providers::{provider_for, AnthropicProvider, OpenAiProvider, ProviderKind};
pub use security::{mask_key, SecretString};
pub use settings::{AppSettings, MaskedSettings, SettingsUpdate};
pub use sources::SerpApiListingSource;
pub use stores::MemoryStore;
pub use traits::{CompletionProvider, HistoryLog, ListingSource, PricingStore, ResultCache};
pub use types::{
    AnalysisResult, CacheEntry, CacheKey, Comp, ConfidenceLabel, Currency, HistoryRecord,
    PriceSummary, ProductType, Query, RawListing, Region,
};

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;
