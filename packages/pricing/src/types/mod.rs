//! Domain types for the pricing pipeline.

pub mod analysis;
pub mod cache;
pub mod history;
pub mod listing;
pub mod query;

pub use analysis::{AnalysisResult, Comp, ConfidenceLabel, PriceSummary};
pub use cache::{CacheEntry, CacheKey};
pub use history::HistoryRecord;
pub use listing::RawListing;
pub use query::{Currency, ProductType, Query, Region};
