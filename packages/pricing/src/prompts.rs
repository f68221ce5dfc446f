//! Prompt construction for comp analysis.
//!
//! `build` is a deterministic, pure function of the rule set and the
//! listing batch: no I/O, no clock, no randomness. The instructions
//! encode the domain rule set and the strict output schema; the payload
//! serializes every listing with an explicit "N/A" for absent fields so
//! the model never silently receives nothing.

use std::fmt::Write as _;

use crate::rules::{DomainRuleSet, MatchPolicy};
use crate::types::{Currency, RawListing, Region};

/// Instruction text and data payload for one analysis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// System-level instructions: persona, rules, output schema.
    pub instructions: String,

    /// User-level payload: the serialized listing batch.
    pub payload: String,
}

/// Placeholder rendered for any absent listing field.
pub const MISSING_FIELD: &str = "N/A";

const BASE_INSTRUCTIONS: &str = r#"You are an expert pricing analyst for {product}.

Your job is to:
1. Carefully read each eBay sold listing
2. Extract structured data
3. Determine if the listing is a valid comparable
4. Exclude invalid listings with clear reasons
5. Compute a realistic median market price

Pricing Rules:
- Target currency: {currency}
- Target region: {region}
- For USA listings: Use item price only (ignore shipping)
- For Canada listings: Include shipping in total price (item + shipping)
- NEVER include customs, duties, or taxes

You MUST return valid JSON in this exact format:
{
  "summary": {
    "median_price": number,
    "p25_price": number,
    "p75_price": number,
    "currency": "{currency}",
    "confidence_score": number (0-100),
    "confidence_label": "Low" | "Medium" | "High",
    "comps_used": number,
    "comps_excluded": number,
    "notes": ["note1", "note2"]
  },
  "comps": [
    {
      "title": string,
      "url": string,
      "image_url": string,
      "sold_price": number,
      "shipping": number,
      "location": string,
      "sold_date": string,
      "total_used": number,
      "included": boolean,
      "exclusion_reason": string (required if excluded),
      "match_score": number (0-100),
      "extracted_fields": object
    }
  ]
}"#;

/// Render instructions and payload for one batch of listings.
pub fn build(
    rules: &DomainRuleSet,
    currency: Currency,
    region: Region,
    listings: &[RawListing],
) -> RenderedPrompt {
    RenderedPrompt {
        instructions: format_instructions(rules, currency, region),
        payload: format_payload(listings),
    }
}

/// Render the full instruction text for a domain.
pub fn format_instructions(rules: &DomainRuleSet, currency: Currency, region: Region) -> String {
    let mut out = BASE_INSTRUCTIONS
        .replace("{product}", rules.analyst_label)
        .replace("{currency}", currency.as_str())
        .replace("{region}", region.as_str());

    let _ = write!(out, "\n\n{} Specific Rules:\n", rules.section_title);

    if let Some(structure) = rules.title_structure {
        let _ = write!(out, "\nTitle Structure (most common):\n{structure}\n");
    }

    out.push_str("\nExtract these fields:\n");
    for field in rules.extracted_fields {
        if field.detail.is_empty() {
            let _ = writeln!(out, "- {}", field.key);
        } else {
            let _ = writeln!(out, "- {} ({})", field.key, field.detail);
        }
    }

    out.push_str("\nExclusion Rules:\n");
    for rule in rules.exclusion_rules {
        let _ = writeln!(out, "- {rule}");
    }

    match rules.match_policy {
        MatchPolicy::Weighted {
            weights,
            inclusion_threshold,
        } => {
            out.push_str("\nMatch Scoring (0-100):\n");
            for (criterion, points) in weights {
                let _ = writeln!(out, "- {criterion}: +{points}");
            }
            let _ = write!(
                out,
                "\nOnly use listings with match score >= {inclusion_threshold}."
            );
        }
        MatchPolicy::ExactMatch { required } => {
            out.push_str("\nMatch Requirements:\n");
            let _ = writeln!(out, "- MUST match: {}", required.join(", "));
            out.push_str("- Listings missing critical specs should be excluded");
        }
    }

    out
}

/// Serialize the listing batch, one block per listing, absent fields
/// rendered as "N/A".
pub fn format_payload(listings: &[RawListing]) -> String {
    let blocks = listings
        .iter()
        .enumerate()
        .map(|(idx, listing)| format_listing(idx + 1, listing))
        .collect::<Vec<_>>()
        .join("\n---\n\n");

    format!(
        "Analyze these {} sold listings and return the pricing analysis in the required JSON format:\n\n{}",
        listings.len(),
        blocks
    )
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING_FIELD)
}

fn format_listing(number: usize, listing: &RawListing) -> String {
    format!(
        "Listing {number}:\nTitle: {}\nPrice: {}\nShipping: {}\nLocation: {}\nDate: {}\nLink: {}\nThumbnail: {}\n",
        field(&listing.title),
        field(&listing.price),
        field(&listing.shipping),
        field(&listing.location),
        field(&listing.sold_date),
        field(&listing.link),
        field(&listing.thumbnail),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductType;

    fn card_rules() -> &'static DomainRuleSet {
        DomainRuleSet::for_product(ProductType::Card)
    }

    fn laptop_rules() -> &'static DomainRuleSet {
        DomainRuleSet::for_product(ProductType::Laptop)
    }

    #[test]
    fn test_instructions_carry_currency_and_region() {
        let text = format_instructions(card_rules(), Currency::Cad, Region::Ca);
        assert!(text.contains("Target currency: CAD"));
        assert!(text.contains("Target region: ca"));
        assert!(text.contains("\"currency\": \"CAD\""));
    }

    #[test]
    fn test_card_instructions_render_weights_and_threshold() {
        let text = format_instructions(card_rules(), Currency::Usd, Region::Us);
        assert!(text.contains("Same grade & grader: +30"));
        assert!(text.contains("Same player: +25"));
        assert!(text.contains("match score >= 70"));
        assert!(text.contains("Title Structure"));
    }

    #[test]
    fn test_laptop_instructions_render_exact_match_requirements() {
        let text = format_instructions(laptop_rules(), Currency::Usd, Region::Us);
        assert!(text.contains("MUST match: product line, screen size, chip, RAM, storage"));
        assert!(!text.contains("Match Scoring"));
        assert!(!text.contains("Title Structure"));
    }

    #[test]
    fn test_payload_uses_na_for_absent_fields() {
        let listing = RawListing::new().with_title("PSA 10 Matthews Young Guns");
        let payload = format_payload(&[listing]);

        assert!(payload.contains("Title: PSA 10 Matthews Young Guns"));
        assert!(payload.contains("Price: N/A"));
        assert!(payload.contains("Shipping: N/A"));
        assert!(payload.contains("Thumbnail: N/A"));
    }

    #[test]
    fn test_payload_counts_and_numbers_listings() {
        let listings = vec![
            RawListing::new().with_title("a"),
            RawListing::new().with_title("b"),
            RawListing::new().with_title("c"),
        ];
        let payload = format_payload(&listings);

        assert!(payload.starts_with("Analyze these 3 sold listings"));
        assert!(payload.contains("Listing 1:"));
        assert!(payload.contains("Listing 3:"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let listings = vec![RawListing::new()
            .with_title("2016-17 UD Young Guns #201")
            .with_price("C $450.00")];

        let a = build(card_rules(), Currency::Cad, Region::Ca, &listings);
        let b = build(card_rules(), Currency::Cad, Region::Ca, &listings);
        assert_eq!(a, b);
    }
}
