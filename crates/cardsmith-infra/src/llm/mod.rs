//! Concrete [`LlmProvider`](cardsmith_core::llm::provider::LlmProvider)
//! implementations and the factory that picks one from configuration.

pub mod anthropic;
pub mod openai_compat;

use secrecy::SecretString;

use cardsmith_core::llm::box_provider::BoxLlmProvider;
use cardsmith_types::config::ProviderSettings;
use cardsmith_types::llm::{LlmError, ProviderType};

use self::anthropic::AnthropicProvider;
use self::openai_compat::OpenAiCompatibleProvider;

/// Build a [`BoxLlmProvider`] from provider settings and a resolved key.
///
/// For OpenAI-compatible providers an explicit `base_url` wins; otherwise the
/// provider name selects a preset and unknown names fall back to OpenAI.
///
/// # Errors
///
/// [`LlmError::AuthenticationFailed`] when no key was resolved.
pub fn create_provider(
    settings: &ProviderSettings,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key.ok_or(LlmError::AuthenticationFailed)?;

    match settings.provider_type {
        ProviderType::Anthropic => {
            let mut provider = AnthropicProvider::new(key, settings.card_model.clone())?;
            if let Some(base_url) = settings.base_url.as_deref() {
                provider = provider.with_base_url(base_url);
            }
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderType::OpenAiCompatible => {
            let config = match settings.base_url.as_deref() {
                Some(base_url) => {
                    openai_compat::config::custom(&settings.name, base_url, key, &settings.card_model)
                }
                None => openai_compat::config::preset(&settings.name, key, &settings.card_model),
            };
            Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(config)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider_type: ProviderType, name: &str, base_url: Option<&str>) -> ProviderSettings {
        ProviderSettings {
            provider_type,
            name: name.to_string(),
            base_url: base_url.map(str::to_string),
            ..ProviderSettings::default()
        }
    }

    fn key() -> Option<SecretString> {
        Some(SecretString::from("test-key"))
    }

    #[test]
    fn test_create_provider_default_is_gemini() {
        let provider = create_provider(&ProviderSettings::default(), key()).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn test_create_provider_anthropic() {
        let provider = create_provider(&settings(ProviderType::Anthropic, "anthropic", None), key()).unwrap();
        assert_eq!(provider.name(), "anthropic");
    }

    #[test]
    fn test_create_provider_openai_compatible_by_name() {
        let provider =
            create_provider(&settings(ProviderType::OpenAiCompatible, "mistral", None), key()).unwrap();
        assert_eq!(provider.name(), "mistral");
    }

    #[test]
    fn test_create_provider_with_base_url() {
        let provider = create_provider(
            &settings(
                ProviderType::OpenAiCompatible,
                "local-llm",
                Some("http://localhost:11434/v1"),
            ),
            key(),
        )
        .unwrap();
        assert_eq!(provider.name(), "local-llm");
    }

    #[test]
    fn test_unknown_name_falls_back_to_openai() {
        let provider =
            create_provider(&settings(ProviderType::OpenAiCompatible, "mystery", None), key()).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_create_provider_missing_key() {
        match create_provider(&ProviderSettings::default(), None) {
            Err(LlmError::AuthenticationFailed) => {}
            Err(other) => panic!("expected AuthenticationFailed, got: {other}"),
            Ok(_) => panic!("expected error but got Ok"),
        }
    }
}
