//! Core trait abstractions for the pipeline's collaborators.

pub mod listing_source;
pub mod llm;
pub mod store;

pub use listing_source::ListingSource;
pub use llm::CompletionProvider;
pub use store::{HistoryLog, PricingStore, ResultCache};
