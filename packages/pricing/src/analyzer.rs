//! Comp analysis: invoke the provider, parse its completion, enforce
//! the output contract.
//!
//! The model performs classification, match scoring, and aggregation
//! under a strict schema; this module is where that schema stops being
//! a promise and becomes a checked contract. A completion that fails
//! any check is rejected whole - there is no partial acceptance.

use rust_decimal::Decimal;

use crate::error::{PricingError, Result};
use crate::prompts::RenderedPrompt;
use crate::rules::{self, DomainRuleSet, MatchPolicy};
use crate::traits::CompletionProvider;
use crate::types::{AnalysisResult, Comp, Currency, Region};

/// Provider-agnostic comp analyzer.
///
/// Holds the configured [`CompletionProvider`]; everything above the
/// provider boundary is identical across backends.
pub struct CompAnalyzer {
    provider: Box<dyn CompletionProvider>,
}

impl CompAnalyzer {
    /// Create an analyzer over the given provider.
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Run one analysis call and validate the result.
    pub async fn analyze(
        &self,
        prompt: &RenderedPrompt,
        rules: &DomainRuleSet,
        currency: Currency,
        region: Region,
    ) -> Result<AnalysisResult> {
        tracing::debug!(provider = self.provider.name(), "requesting comp analysis");

        let raw = self
            .provider
            .complete(&prompt.instructions, &prompt.payload)
            .await?;

        let parsed: AnalysisResult = serde_json::from_str(&raw)
            .or_else(|_| serde_json::from_str(strip_code_fences(&raw)))
            .map_err(|e| PricingError::analysis_parse(format!("invalid JSON: {e}"), &raw))?;

        if let Err(message) = validate_analysis(&parsed, rules, currency, region) {
            return Err(PricingError::analysis_parse(message, raw));
        }

        Ok(parsed)
    }
}

/// Strip a Markdown code fence the model may have wrapped around the JSON.
fn strip_code_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Check an analysis against the full output contract.
///
/// Returns the first violation found, phrased for the error message.
pub fn validate_analysis(
    analysis: &AnalysisResult,
    rules: &DomainRuleSet,
    currency: Currency,
    region: Region,
) -> std::result::Result<(), String> {
    let summary = &analysis.summary;

    if summary.currency != currency {
        return Err(format!(
            "summary currency {} does not match configured currency {}",
            summary.currency, currency
        ));
    }

    if summary.confidence_score > 100 {
        return Err(format!(
            "confidence_score {} out of range 0-100",
            summary.confidence_score
        ));
    }

    let included = analysis.included_count();
    let excluded = analysis.comps.len() - included;

    if summary.comps_used != included {
        return Err(format!(
            "comps_used {} does not match included comp count {included}",
            summary.comps_used
        ));
    }
    if summary.comps_excluded != excluded {
        return Err(format!(
            "comps_excluded {} does not match excluded comp count {excluded}",
            summary.comps_excluded
        ));
    }

    if included > 0
        && !(summary.p25_price <= summary.median_price && summary.median_price <= summary.p75_price)
    {
        return Err(format!(
            "percentiles out of order: p25 {} / median {} / p75 {}",
            summary.p25_price, summary.median_price, summary.p75_price
        ));
    }

    for (idx, comp) in analysis.comps.iter().enumerate() {
        validate_comp(idx, comp, rules, region)?;
    }

    Ok(())
}

fn validate_comp(
    idx: usize,
    comp: &Comp,
    rules: &DomainRuleSet,
    region: Region,
) -> std::result::Result<(), String> {
    if comp.included == comp.has_exclusion_reason() {
        return Err(if comp.included {
            format!("comp {idx} is included but carries an exclusion reason")
        } else {
            format!("comp {idx} is excluded without an exclusion reason")
        });
    }

    if let Some(score) = comp.match_score {
        if score > 100 {
            return Err(format!("comp {idx} match_score {score} out of range 0-100"));
        }
    }

    if !comp.included {
        return Ok(());
    }

    let sold_price = comp
        .sold_price
        .ok_or_else(|| format!("included comp {idx} is missing sold_price"))?;
    let total_used = comp
        .total_used
        .ok_or_else(|| format!("included comp {idx} is missing total_used"))?;

    let expected = rules::total_price(region, sold_price, comp.shipping);
    if total_used != expected {
        return Err(format!(
            "included comp {idx} total_used {total_used} does not follow the {region} price \
             composition rule (expected {expected})"
        ));
    }

    if let MatchPolicy::Weighted {
        inclusion_threshold,
        ..
    } = rules.match_policy
    {
        let score = comp
            .match_score
            .ok_or_else(|| format!("included comp {idx} is missing match_score"))?;
        if score < inclusion_threshold {
            return Err(format!(
                "included comp {idx} match_score {score} is below the inclusion threshold \
                 {inclusion_threshold}"
            ));
        }
    }

    if sold_price < Decimal::ZERO {
        return Err(format!("included comp {idx} has a negative sold_price"));
    }

    Ok(())
}
