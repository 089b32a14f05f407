//! Configuration types for Cardsmith.
//!
//! `StudioConfig` represents the top-level `config.toml`: which generation
//! provider to call, which models to use for card and site generation, and
//! presentation settings for the studio front-end.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderType;

/// Top-level configuration.
///
/// Loaded from `~/.cardsmith/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub studio: StudioSettings,
}

/// Generation provider selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_provider_type")]
    pub provider_type: ProviderType,

    /// Preset name for OpenAI-compatible backends ("gemini", "openai", "mistral").
    #[serde(default = "default_provider_name")]
    pub name: String,

    /// Name of the secret holding the API key (env var or keychain entry).
    #[serde(default = "default_api_key_secret_name")]
    pub api_key_secret_name: String,

    /// Override the preset's base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model used for pack draws and forging.
    #[serde(default = "default_card_model")]
    pub card_model: String,

    /// Model used for site assembly.
    #[serde(default = "default_site_model")]
    pub site_model: String,

    #[serde(default = "default_card_max_tokens")]
    pub card_max_tokens: u32,

    #[serde(default = "default_site_max_tokens")]
    pub site_max_tokens: u32,
}

fn default_provider_type() -> ProviderType {
    ProviderType::OpenAiCompatible
}

fn default_provider_name() -> String {
    "gemini".to_string()
}

fn default_api_key_secret_name() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_card_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_site_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_card_max_tokens() -> u32 {
    16_384
}

fn default_site_max_tokens() -> u32 {
    32_768
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            name: default_provider_name(),
            api_key_secret_name: default_api_key_secret_name(),
            base_url: None,
            card_model: default_card_model(),
            site_model: default_site_model(),
            card_max_tokens: default_card_max_tokens(),
            site_max_tokens: default_site_max_tokens(),
        }
    }
}

/// Front-end pacing and export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioSettings {
    /// Pause after a successful pack draw before the cards are revealed.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,

    /// Default file name for exported sites.
    #[serde(default = "default_export_file")]
    pub export_file: String,
}

fn default_reveal_delay_ms() -> u64 {
    1500
}

fn default_export_file() -> String {
    "cardsmith_site.html".to_string()
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            reveal_delay_ms: default_reveal_delay_ms(),
            export_file: default_export_file(),
        }
    }
}
