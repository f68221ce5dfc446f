//! Analysis output types: classified comps and the aggregated price summary.
//!
//! These types double as the wire schema the LLM is contracted to emit;
//! [`crate::analyzer`] enforces the contract after deserialization.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::query::Currency;

/// A sold listing after LLM classification.
///
/// Invariant: `included == true` iff `exclusion_reason` is absent or
/// blank; an excluded comp always carries a non-empty reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comp {
    /// Listing title.
    pub title: String,

    /// Link to the listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Thumbnail image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Item sale price, without shipping.
    #[serde(default)]
    pub sold_price: Option<Decimal>,

    /// Shipping cost, when stated on the listing.
    #[serde(default)]
    pub shipping: Option<Decimal>,

    /// Seller location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Sale date as reported by the marketplace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_date: Option<String>,

    /// Total price that entered the aggregate, computed per the active
    /// region's price-composition rule. Required for included comps.
    #[serde(default)]
    pub total_used: Option<Decimal>,

    /// Whether this comp contributes to the price estimate.
    pub included: bool,

    /// Why the comp was excluded. Required (non-empty) when excluded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion_reason: Option<String>,

    /// 0-100 similarity to the queried item. Present for domains with a
    /// weighted match policy; absent for exact-match domains.
    #[serde(default)]
    pub match_score: Option<u8>,

    /// Domain-specific attributes extracted from the listing title,
    /// in the order the model emitted them.
    #[serde(default)]
    pub extracted_fields: IndexMap<String, serde_json::Value>,
}

impl Comp {
    /// Whether the comp carries a non-blank exclusion reason.
    pub fn has_exclusion_reason(&self) -> bool {
        self.exclusion_reason
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty())
    }
}

/// Qualitative confidence rating derived from comp count and consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    Low,
    Medium,
    High,
}

/// Aggregated price distribution over the included comps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub median_price: Decimal,
    pub p25_price: Decimal,
    pub p75_price: Decimal,
    pub currency: Currency,

    /// 0-100 trustworthiness of the aggregate.
    pub confidence_score: u8,
    pub confidence_label: ConfidenceLabel,

    /// Number of comps with `included == true`.
    pub comps_used: usize,

    /// Number of comps excluded from the aggregate.
    pub comps_excluded: usize,

    /// Analyst notes, in the order the model emitted them.
    #[serde(default)]
    pub notes: Vec<String>,
}

/// The unit of caching and the unit returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: PriceSummary,
    pub comps: Vec<Comp>,
}

impl AnalysisResult {
    /// Count of comps marked included.
    pub fn included_count(&self) -> usize {
        self.comps.iter().filter(|c| c.included).count()
    }
}
