//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of sensitive values.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
///
/// Uses `secrecy::SecretBox` to ensure API keys are never accidentally
/// exposed in logs, debug output, or error messages.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when actually using the secret (e.g., in an API request).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the secret is the empty string (credential not configured).
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }

    /// Masked rendering safe to return from a settings endpoint:
    /// first four and last four characters with `...` between.
    /// Keys shorter than 8 characters mask to the empty string.
    pub fn masked(&self) -> String {
        mask_key(self.expose())
    }
}

/// Mask an API key as `first4...last4`, or `""` when too short to mask.
pub fn mask_key(key: &str) -> String {
    if key.len() < 8 {
        return String::new();
    }
    match (key.get(..4), key.get(key.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{head}...{tail}"),
        _ => String::new(),
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
