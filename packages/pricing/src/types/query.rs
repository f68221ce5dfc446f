//! Query types - one immutable query per pricing request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product domain of a pricing query.
///
/// Each variant selects a [`DomainRuleSet`](crate::rules::DomainRuleSet);
/// adding a variant means adding a rule set, not touching the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    /// Graded/raw trading cards (wire value `hockey_card`).
    #[serde(rename = "hockey_card")]
    Card,

    /// Laptop configurations (wire value `macbook`).
    #[serde(rename = "macbook")]
    Laptop,
}

impl ProductType {
    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "hockey_card",
            Self::Laptop => "macbook",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hockey_card" => Ok(Self::Card),
            "macbook" => Ok(Self::Laptop),
            other => Err(format!("unknown product type: {other}")),
        }
    }
}

/// Marketplace region a query prices against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Us,
    Ca,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Ca => "ca",
        }
    }

    /// eBay marketplace domain for this region.
    pub fn ebay_domain(&self) -> &'static str {
        match self {
            Self::Us => "ebay.com",
            Self::Ca => "ebay.ca",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "us" | "usa" => Ok(Self::Us),
            "ca" | "canada" => Ok(Self::Ca),
            other => Err(format!("unknown region: {other}")),
        }
    }
}

/// Currency the aggregated prices are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Cad,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Cad => "CAD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "CAD" => Ok(Self::Cad),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}

/// An immutable pricing query, constructed once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Free-text product description, used verbatim as the search string
    /// and (case-sensitively) as part of the cache key.
    pub text: String,

    /// Product domain.
    pub product_type: ProductType,

    /// Marketplace region to search.
    pub region: Region,

    /// Skip the cache check and recompute unconditionally.
    pub force_refresh: bool,
}

impl Query {
    /// Create a new query with `force_refresh` off.
    pub fn new(text: impl Into<String>, product_type: ProductType, region: Region) -> Self {
        Self {
            text: text.into(),
            product_type,
            region,
            force_refresh: false,
        }
    }

    /// Set the force-refresh flag.
    pub fn with_force_refresh(mut self, force: bool) -> Self {
        self.force_refresh = force;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&ProductType::Card).unwrap(),
            "\"hockey_card\""
        );
        assert_eq!(
            serde_json::from_str::<ProductType>("\"macbook\"").unwrap(),
            ProductType::Laptop
        );
    }

    #[test]
    fn test_region_parsing_accepts_long_forms() {
        assert_eq!("canada".parse::<Region>().unwrap(), Region::Ca);
        assert_eq!("usa".parse::<Region>().unwrap(), Region::Us);
        assert_eq!("us".parse::<Region>().unwrap(), Region::Us);
        assert!("eu".parse::<Region>().is_err());
    }

    #[test]
    fn test_ebay_domain_per_region() {
        assert_eq!(Region::Ca.ebay_domain(), "ebay.ca");
        assert_eq!(Region::Us.ebay_domain(), "ebay.com");
    }

    #[test]
    fn test_currency_roundtrip() {
        assert_eq!(serde_json::to_string(&Currency::Cad).unwrap(), "\"CAD\"");
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
    }

    #[test]
    fn test_query_builder() {
        let q = Query::new("2016-17 Upper Deck Young Guns", ProductType::Card, Region::Ca)
            .with_force_refresh(true);
        assert!(q.force_refresh);
        assert_eq!(q.product_type, ProductType::Card);
    }
}
