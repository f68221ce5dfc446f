//! Per-domain pricing rule sets.
//!
//! Rule sets are declarative data, not control flow: each product domain
//! is one static record describing what to extract, what to exclude, and
//! how to gate inclusion. [`crate::prompts`] renders them into model
//! instructions and [`crate::analyzer`] enforces them on the model's
//! output. Adding a domain means adding a static record and a match arm
//! in [`DomainRuleSet::for_product`]; the pipeline is untouched.

use rust_decimal::Decimal;

use crate::types::{ProductType, Region};

/// A structured attribute the model must extract from each listing.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Key under which the attribute appears in `extracted_fields`.
    pub key: &'static str,

    /// Rendered hint: examples or accepted values.
    pub detail: &'static str,

    /// Whether the attribute may legitimately be absent.
    pub optional: bool,
}

impl FieldSpec {
    const fn required(key: &'static str, detail: &'static str) -> Self {
        Self {
            key,
            detail,
            optional: false,
        }
    }

    const fn opt(key: &'static str, detail: &'static str) -> Self {
        Self {
            key,
            detail,
            optional: true,
        }
    }
}

/// How a domain gates comp inclusion.
#[derive(Debug, Clone, Copy)]
pub enum MatchPolicy {
    /// Additive 0-100 scoring; listings below the threshold are excluded.
    Weighted {
        /// Criterion label and points awarded when it matches.
        weights: &'static [(&'static str, u8)],
        inclusion_threshold: u8,
    },

    /// Hard requirements: a listing missing or mismatching any of these
    /// attributes is excluded outright. No numeric score.
    ExactMatch {
        required: &'static [&'static str],
    },
}

/// Static per-domain configuration.
#[derive(Debug, Clone, Copy)]
pub struct DomainRuleSet {
    pub product_type: ProductType,

    /// What the analyst persona prices, e.g. "hockey cards".
    pub analyst_label: &'static str,

    /// Heading for the domain rules section of the prompt.
    pub section_title: &'static str,

    /// Typical listing-title anatomy, when the domain has one.
    pub title_structure: Option<&'static str>,

    pub extracted_fields: &'static [FieldSpec],
    pub exclusion_rules: &'static [&'static str],
    pub match_policy: MatchPolicy,
}

static CARD_RULES: DomainRuleSet = DomainRuleSet {
    product_type: ProductType::Card,
    analyst_label: "hockey cards",
    section_title: "Hockey Card",
    title_structure: Some(
        "YEAR/SEASON -> BRAND/SET -> INSERT/SUBSET -> PLAYER NAME -> CARD TYPE -> \
         ROOKIE (RC) -> SERIAL (/XX) -> CARD NUMBER (#XX) -> GRADE",
    ),
    extracted_fields: &[
        FieldSpec::required("year", "e.g., 2016-17"),
        FieldSpec::required("brand_set", "Upper Deck, The Cup, SP Authentic, OPC, etc."),
        FieldSpec::required("insert_subset", "Young Guns, FWA, Exquisite, etc."),
        FieldSpec::required("player_name", ""),
        FieldSpec::required("card_type", "Auto, Patch, RPA, etc."),
        FieldSpec::required("rookie_indicator", "RC or implied like Young Guns"),
        FieldSpec::required("serial_number", "/99, /25, 1/1"),
        FieldSpec::required("card_number", "#201"),
        FieldSpec::required("grading_company", "PSA, BGS, SGC"),
        FieldSpec::required("grade", "10, 9.5, etc."),
    ],
    exclusion_rules: &[
        "Lots/bundles",
        "Reprints",
        "Digital cards",
        "Empty boxes/cases",
        "Wrong player",
        "Wrong set/insert",
        "Wrong grade",
        "\"Custom\", \"Fan made\", \"Read description\"",
        "Misleading listings",
    ],
    match_policy: MatchPolicy::Weighted {
        weights: &[
            ("Same player", 25),
            ("Same set/insert", 25),
            ("Same grade & grader", 30),
            ("Same serial/parallel", 15),
            ("Same year", 5),
        ],
        inclusion_threshold: 70,
    },
};

static LAPTOP_RULES: DomainRuleSet = DomainRuleSet {
    product_type: ProductType::Laptop,
    analyst_label: "MacBooks",
    section_title: "MacBook",
    title_structure: None,
    extracted_fields: &[
        FieldSpec::required("product_line", "MacBook Air / Pro"),
        FieldSpec::required("screen_size", "13 / 14 / 15 / 16"),
        FieldSpec::required("chip", "M1 / M1 Pro / M1 Max / M2 / M3, etc."),
        FieldSpec::required("ram", "8 / 16 / 32 / 64 / 96 GB"),
        FieldSpec::required("storage", "256 / 512 / 1TB / 2TB, etc."),
        FieldSpec::required("year", ""),
        FieldSpec::required("condition", ""),
        FieldSpec::opt("battery_health", "if mentioned"),
        FieldSpec::opt("applecare", "yes/no"),
    ],
    exclusion_rules: &[
        "\"For parts\"",
        "\"Broken\"",
        "\"No power\"",
        "MDM, iCloud locked, Activation lock",
        "Logic board only",
        "Empty box",
        "Lot/bundle",
        "Wrong size, chip, RAM, or storage",
    ],
    match_policy: MatchPolicy::ExactMatch {
        required: &["product line", "screen size", "chip", "RAM", "storage"],
    },
};

impl DomainRuleSet {
    /// Rule set for a product domain. Loaded once, shared forever.
    pub fn for_product(product_type: ProductType) -> &'static DomainRuleSet {
        match product_type {
            ProductType::Card => &CARD_RULES,
            ProductType::Laptop => &LAPTOP_RULES,
        }
    }

    /// Inclusion threshold for weighted domains, `None` otherwise.
    pub fn inclusion_threshold(&self) -> Option<u8> {
        match self.match_policy {
            MatchPolicy::Weighted {
                inclusion_threshold,
                ..
            } => Some(inclusion_threshold),
            MatchPolicy::ExactMatch { .. } => None,
        }
    }
}

/// Region price-composition rule, shared by every domain.
///
/// US: item price only, shipping ignored. CA: item price plus shipping.
/// Taxes, duties, and customs are never included under either region.
pub fn total_price(region: Region, item_price: Decimal, shipping: Option<Decimal>) -> Decimal {
    match region {
        Region::Us => item_price,
        Region::Ca => item_price + shipping.unwrap_or(Decimal::ZERO),
    }
}
