//! Completion provider trait: the LLM boundary.
//!
//! The two production backends differ in request/response shape but
//! share one logical contract: send instructions + payload, receive one
//! completion string. Everything above this trait is provider-agnostic;
//! adding a backend means one more implementation, selected by the
//! configuration enum at the orchestration boundary (see
//! [`crate::providers::provider_for`]) - never by conditionals inside
//! the pipeline.

use async_trait::async_trait;

use crate::error::Result;

/// An interchangeable large-language-model backend.
///
/// # Implementations
///
/// - [`AnthropicProvider`](crate::providers::AnthropicProvider)
/// - [`OpenAiProvider`](crate::providers::OpenAiProvider)
/// - [`MockCompletionProvider`](crate::testing::MockCompletionProvider) - for testing
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider label for logging.
    fn name(&self) -> &'static str;

    /// Send `instructions` + `payload` and return the completion text.
    ///
    /// The completion is expected to be a JSON document matching the
    /// analysis schema; parsing and validation happen in
    /// [`CompAnalyzer`](crate::analyzer::CompAnalyzer), not here.
    async fn complete(&self, instructions: &str, payload: &str) -> Result<String>;
}
