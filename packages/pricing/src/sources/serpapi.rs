//! SerpApi-backed sold-listings source.
//!
//! Queries SerpApi's eBay engine for sold + completed listings on the
//! marketplace domain matching the query region.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{PricingError, Result};
use crate::security::SecretString;
use crate::traits::ListingSource;
use crate::types::{RawListing, Region};

/// eBay sold-listings index via SerpApi.
pub struct SerpApiListingSource {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl SerpApiListingSource {
    /// Create a new source with the given API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: "https://serpapi.com/search".to_string(),
        }
    }

    /// Set a custom base URL (for test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl ListingSource for SerpApiListingSource {
    async fn sold_listings(&self, query: &str, region: Region) -> Result<Vec<RawListing>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("engine", "ebay"),
                ("ebay_domain", region.ebay_domain()),
                ("_nkw", query),
                ("LH_Sold", "1"),
                ("LH_Complete", "1"),
                ("api_key", self.api_key.expose()),
            ])
            .send()
            .await
            .map_err(|e| PricingError::Fetch(format!("SerpApi error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PricingError::Fetch(format!("SerpApi error: {status}")));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| PricingError::Fetch(format!("SerpApi error: {e}")))?;

        Ok(body
            .organic_results
            .unwrap_or_default()
            .into_iter()
            .map(SerpListing::into_raw_listing)
            .collect())
    }
}

// Response types

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Option<Vec<SerpListing>>,
}

#[derive(Deserialize)]
struct SerpListing {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    price: Option<SerpPrice>,
    #[serde(default)]
    shipping: Option<SerpPrice>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
}

/// SerpApi renders monetary fields as `{raw, value}`; prefer the raw
/// display string, fall back to the numeric value.
#[derive(Deserialize)]
struct SerpPrice {
    #[serde(default)]
    raw: Option<String>,
    #[serde(default)]
    value: Option<f64>,
}

impl SerpPrice {
    fn display(self) -> Option<String> {
        self.raw.or_else(|| self.value.map(|v| v.to_string()))
    }
}

impl SerpListing {
    fn into_raw_listing(self) -> RawListing {
        RawListing {
            title: self.title,
            price: self.price.and_then(SerpPrice::display),
            shipping: self.shipping.and_then(SerpPrice::display),
            location: self.location,
            sold_date: self.date,
            link: self.link,
            thumbnail: self.thumbnail,
        }
    }
}
