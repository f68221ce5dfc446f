//! Typed errors for the pricing library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Messages that reach the
//! request boundary are surfaced verbatim, so the variants that wrap
//! upstream failures carry the full upstream message.

use thiserror::Error;

/// Errors that can occur during a pricing run.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Required configuration (API credentials) is absent. Fatal, no retry.
    #[error("{0}")]
    Config(String),

    /// Listing source unreachable or returned a transport-level error.
    #[error("{0}")]
    Fetch(String),

    /// Listing source returned zero listings. Distinct from [`Fetch`] so
    /// the caller can suggest refining the query instead of retrying.
    ///
    /// [`Fetch`]: PricingError::Fetch
    #[error("No sold listings found on eBay for this query.")]
    EmptyResults,

    /// LLM provider unreachable or returned a non-success response.
    /// The provider's message is bubbled up verbatim.
    #[error("{0}")]
    Llm(String),

    /// LLM output failed JSON parsing or contract validation.
    ///
    /// Never partially accepted; `raw` holds the offending completion
    /// text for diagnosis.
    #[error("analysis response failed validation: {message}")]
    AnalysisParse { message: String, raw: String },

    /// Cache or history write failed.
    #[error("persistence error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PricingError {
    /// Build an [`AnalysisParse`] error, logging the offending raw text.
    ///
    /// [`AnalysisParse`]: PricingError::AnalysisParse
    pub fn analysis_parse(message: impl Into<String>, raw: impl Into<String>) -> Self {
        let message = message.into();
        let raw = raw.into();
        tracing::error!(%message, raw = %raw, "LLM analysis rejected");
        Self::AnalysisParse { message, raw }
    }

    /// Build a [`Persistence`] error from any error type.
    ///
    /// [`Persistence`]: PricingError::Persistence
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Box::new(err))
    }
}

/// Result type alias for pricing operations.
pub type Result<T> = std::result::Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_message_is_verbatim() {
        let err = PricingError::Config("API keys not configured. Please visit Settings page.".into());
        assert_eq!(
            err.to_string(),
            "API keys not configured. Please visit Settings page."
        );
    }

    #[test]
    fn test_empty_results_message_is_distinct_from_fetch() {
        let fetch = PricingError::Fetch("SerpApi error: 503 Service Unavailable".into());
        let empty = PricingError::EmptyResults;
        assert_ne!(fetch.to_string(), empty.to_string());
        assert!(empty.to_string().contains("No sold listings"));
    }

    #[test]
    fn test_analysis_parse_keeps_raw_text() {
        let err = PricingError::analysis_parse("invalid JSON", "not json at all");
        match err {
            PricingError::AnalysisParse { raw, .. } => assert_eq!(raw, "not json at all"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
