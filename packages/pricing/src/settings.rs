//! Application settings.
//!
//! Settings are an explicit value handed to the pipeline at call time,
//! not ambient state. The "blank credential means leave unchanged"
//! merge policy lives here as a pure transform so it can be tested in
//! isolation from the HTTP surface.

use serde::{Deserialize, Serialize};

use crate::providers::ProviderKind;
use crate::security::SecretString;
use crate::types::{Currency, Region};

/// Runtime configuration for the pricing service.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// SerpApi credential for the listing source.
    pub serpapi_key: SecretString,

    /// Credential for the selected LLM provider.
    pub llm_api_key: SecretString,

    pub llm_provider: ProviderKind,
    pub default_currency: Currency,
    pub default_region: Region,

    /// Whether LLM comp filtering is enabled. Carried on the settings
    /// surface for parity with the settings endpoint contract.
    pub use_ai_filtering: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            serpapi_key: SecretString::new(""),
            llm_api_key: SecretString::new(""),
            llm_provider: ProviderKind::Claude,
            default_currency: Currency::Cad,
            default_region: Region::Ca,
            use_ai_filtering: true,
        }
    }
}

impl AppSettings {
    /// Bootstrap settings from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    ///
    /// Variables: `SERPAPI_KEY`, `LLM_API_KEY`, `LLM_PROVIDER`,
    /// `DEFAULT_CURRENCY`, `DEFAULT_REGION`, `USE_AI_FILTERING`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            serpapi_key: SecretString::new(std::env::var("SERPAPI_KEY").unwrap_or_default()),
            llm_api_key: SecretString::new(std::env::var("LLM_API_KEY").unwrap_or_default()),
            llm_provider: std::env::var("LLM_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.llm_provider),
            default_currency: std::env::var("DEFAULT_CURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_currency),
            default_region: std::env::var("DEFAULT_REGION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_region),
            use_ai_filtering: std::env::var("USE_AI_FILTERING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.use_ai_filtering),
        }
    }

    /// Whether both external credentials are configured.
    pub fn has_credentials(&self) -> bool {
        !self.serpapi_key.is_empty() && !self.llm_api_key.is_empty()
    }

    /// View safe to return from the settings endpoint: credentials are
    /// masked as `first4...last4`.
    pub fn masked(&self) -> MaskedSettings {
        MaskedSettings {
            serpapi_key: self.serpapi_key.masked(),
            llm_api_key: self.llm_api_key.masked(),
            llm_provider: self.llm_provider,
            default_currency: self.default_currency,
            default_region: self.default_region,
            use_ai_filtering: self.use_ai_filtering,
        }
    }

    /// Merge an update into these settings.
    ///
    /// A blank or whitespace-only credential field means "leave the
    /// stored credential unchanged"; every other field replaces.
    pub fn apply_update(&self, update: SettingsUpdate) -> AppSettings {
        let merge_key = |current: &SecretString, incoming: Option<String>| -> SecretString {
            match incoming {
                Some(key) if !key.trim().is_empty() => SecretString::new(key),
                _ => current.clone(),
            }
        };

        AppSettings {
            serpapi_key: merge_key(&self.serpapi_key, update.serpapi_key),
            llm_api_key: merge_key(&self.llm_api_key, update.llm_api_key),
            llm_provider: update.llm_provider,
            default_currency: update.default_currency,
            default_region: update.default_region,
            use_ai_filtering: update.use_ai_filtering,
        }
    }
}

/// Masked settings as served by `GET /api/settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskedSettings {
    pub serpapi_key: String,
    pub llm_api_key: String,
    pub llm_provider: ProviderKind,
    pub default_currency: Currency,
    pub default_region: Region,
    pub use_ai_filtering: bool,
}

/// Settings update as accepted by `POST /api/settings`.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub serpapi_key: Option<String>,
    #[serde(default)]
    pub llm_api_key: Option<String>,
    pub llm_provider: ProviderKind,
    pub default_currency: Currency,
    pub default_region: Region,
    pub use_ai_filtering: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AppSettings {
        AppSettings {
            serpapi_key: SecretString::new("serp-1234567890"),
            llm_api_key: SecretString::new("sk-ant-abcdefgh"),
            ..Default::default()
        }
    }

    fn update_keeping_everything() -> SettingsUpdate {
        SettingsUpdate {
            serpapi_key: None,
            llm_api_key: None,
            llm_provider: ProviderKind::Claude,
            default_currency: Currency::Cad,
            default_region: Region::Ca,
            use_ai_filtering: true,
        }
    }

    #[test]
    fn test_defaults_match_original_service() {
        let settings = AppSettings::default();
        assert_eq!(settings.llm_provider, ProviderKind::Claude);
        assert_eq!(settings.default_currency, Currency::Cad);
        assert_eq!(settings.default_region, Region::Ca);
        assert!(settings.use_ai_filtering);
        assert!(!settings.has_credentials());
    }

    #[test]
    fn test_masked_settings_hide_credentials() {
        let masked = configured().masked();
        assert_eq!(masked.serpapi_key, "serp...7890");
        assert_eq!(masked.llm_api_key, "sk-a...efgh");
    }

    #[test]
    fn test_masked_short_key_is_empty() {
        let settings = AppSettings {
            serpapi_key: SecretString::new("short"),
            ..Default::default()
        };
        assert_eq!(settings.masked().serpapi_key, "");
    }

    #[test]
    fn test_blank_credential_leaves_stored_value() {
        let current = configured();

        let update = SettingsUpdate {
            serpapi_key: Some("".into()),
            llm_api_key: Some("   ".into()),
            ..update_keeping_everything()
        };

        let merged = current.apply_update(update);
        assert_eq!(merged.serpapi_key.expose(), "serp-1234567890");
        assert_eq!(merged.llm_api_key.expose(), "sk-ant-abcdefgh");
    }

    #[test]
    fn test_non_blank_credential_replaces() {
        let current = configured();

        let update = SettingsUpdate {
            serpapi_key: Some("serp-new-key-0001".into()),
            llm_api_key: None,
            llm_provider: ProviderKind::Gpt,
            default_currency: Currency::Usd,
            default_region: Region::Us,
            use_ai_filtering: false,
        };

        let merged = current.apply_update(update);
        assert_eq!(merged.serpapi_key.expose(), "serp-new-key-0001");
        assert_eq!(merged.llm_api_key.expose(), "sk-ant-abcdefgh");
        assert_eq!(merged.llm_provider, ProviderKind::Gpt);
        assert_eq!(merged.default_region, Region::Us);
        assert!(!merged.use_ai_filtering);
    }

    #[test]
    fn test_update_deserializes_from_endpoint_body() {
        let update: SettingsUpdate = serde_json::from_str(
            r#"{
                "serpapi_key": "",
                "llm_api_key": "sk-new",
                "llm_provider": "gpt",
                "default_currency": "USD",
                "default_region": "us",
                "use_ai_filtering": false
            }"#,
        )
        .unwrap();

        assert_eq!(update.llm_provider, ProviderKind::Gpt);
        assert_eq!(update.serpapi_key.as_deref(), Some(""));
    }
}
