//! Listing source trait: the sold-listings index boundary.
//!
//! The pipeline only needs one operation from the marketplace side:
//! given a search string and a region, return the raw sold listings.
//! Transport details stay behind this trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{RawListing, Region};

/// A queryable index of recently sold marketplace listings.
///
/// # Contract
///
/// - A transport-level failure (unreachable service, non-success status)
///   is a [`Fetch`](crate::PricingError::Fetch) error.
/// - Zero matching listings is a *successful* empty `Vec`; the pipeline
///   converts it into the distinct
///   [`EmptyResults`](crate::PricingError::EmptyResults) failure.
///
/// # Implementations
///
/// - [`SerpApiListingSource`](crate::sources::SerpApiListingSource) - eBay via SerpApi
/// - [`MockListingSource`](crate::testing::MockListingSource) - for testing
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch sold listings matching `query` in `region`.
    async fn sold_listings(&self, query: &str, region: Region) -> Result<Vec<RawListing>>;
}
