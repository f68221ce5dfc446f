//! LLM provider implementations.
//!
//! One adapter per backend, all behind
//! [`CompletionProvider`](crate::traits::CompletionProvider). Selection
//! happens here, once, from the configuration enum.

mod anthropic;
mod openai;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::security::SecretString;
use crate::traits::CompletionProvider;

/// Configuration-supplied provider selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Anthropic Claude (wire value `claude`).
    Claude,

    /// OpenAI GPT (wire value `gpt`).
    Gpt,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gpt => "gpt",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "claude" => Ok(Self::Claude),
            "gpt" | "openai" => Ok(Self::Gpt),
            other => Err(format!("unknown LLM provider: {other}")),
        }
    }
}

/// Build the provider for a configured kind and credential.
///
/// This is the single point where provider selection branches.
pub fn provider_for(kind: ProviderKind, api_key: &SecretString) -> Box<dyn CompletionProvider> {
    match kind {
        ProviderKind::Claude => Box::new(AnthropicProvider::new(api_key.clone())),
        ProviderKind::Gpt => Box::new(OpenAiProvider::new(api_key.clone())),
    }
}
