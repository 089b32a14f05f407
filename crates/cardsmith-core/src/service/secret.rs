//! Secret management service.
//!
//! SecretService resolves secrets through a chain of providers in priority order.
//! Resolution precedence: env vars > OS keychain.
//!
//! This service depends only on `cardsmith-types` and the `SecretProviderDyn`
//! trait -- never on concrete infra implementations.

use crate::repository::secret::DynSecretProvider;
use cardsmith_types::error::RepositoryError;
use cardsmith_types::secret::SecretSource;

/// A secret value together with the backend it came from.
#[derive(Clone)]
pub struct ResolvedSecret {
    pub value: String,
    pub source: SecretSource,
}

impl std::fmt::Debug for ResolvedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecret")
            .field("value", &"***")
            .field("source", &self.source)
            .finish()
    }
}

/// Service for managing secrets across multiple storage backends.
///
/// Providers are ordered by precedence (first match wins).
/// Default chain: `[EnvSecretProvider, KeychainProvider]`
pub struct SecretService {
    providers: Vec<DynSecretProvider>,
}

impl SecretService {
    /// Create a new SecretService with the given provider chain.
    ///
    /// Providers should be ordered by precedence (highest priority first).
    pub fn new(providers: Vec<DynSecretProvider>) -> Self {
        Self { providers }
    }

    /// Resolve a secret value by iterating through providers in priority order.
    pub async fn get_secret(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.resolve(key).await?.map(|resolved| resolved.value))
    }

    /// Like [`get_secret`](Self::get_secret), also reporting which provider answered.
    pub async fn resolve(&self, key: &str) -> Result<Option<ResolvedSecret>, RepositoryError> {
        for provider in &self.providers {
            if let Some(value) = provider.get_boxed(key).await? {
                return Ok(Some(ResolvedSecret {
                    value,
                    source: provider.source(),
                }));
            }
        }
        Ok(None)
    }

    /// Store a secret value in the first writable provider.
    ///
    /// Read-only providers (e.g., env vars) return an error, which is skipped.
    pub async fn set_secret(&self, key: &str, value: &str) -> Result<SecretSource, RepositoryError> {
        for provider in &self.providers {
            match provider.set_boxed(key, value).await {
                Ok(()) => return Ok(provider.source()),
                Err(_) => continue,
            }
        }

        Err(RepositoryError::Query(
            "no writable secret provider available".to_string(),
        ))
    }

    /// Delete a secret from all providers that have it.
    pub async fn delete_secret(&self, key: &str) -> Result<(), RepositoryError> {
        let mut deleted = false;

        for provider in &self.providers {
            match provider.delete_boxed(key).await {
                Ok(()) => deleted = true,
                Err(RepositoryError::NotFound) => continue,
                Err(_) => continue,
            }
        }

        if !deleted {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Mask a secret value, showing only the last 4 characters.
    ///
    /// - "sk-abcdefghijklmnop" -> "****mnop"
    /// - "abc" -> "****" (too short to show any chars)
    pub fn mask_secret(value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() <= 4 {
            "****".to_string()
        } else {
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("****{tail}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::secret::SecretProvider;
    use std::collections::HashMap;
    use std::sync::Arc;

    struct MockProvider {
        source: SecretSource,
        values: HashMap<String, String>,
        writable: bool,
    }

    impl MockProvider {
        fn new(source: SecretSource, writable: bool) -> Self {
            Self {
                source,
                values: HashMap::new(),
                writable,
            }
        }

        fn with_value(mut self, key: &str, value: &str) -> Self {
            self.values.insert(key.to_string(), value.to_string());
            self
        }
    }

    impl SecretProvider for MockProvider {
        fn source(&self) -> SecretSource {
            self.source
        }

        async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
            Ok(self.values.get(key).cloned())
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), RepositoryError> {
            if self.writable {
                Ok(())
            } else {
                Err(RepositoryError::Query(format!("{} is read-only", self.source)))
            }
        }

        async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
            if self.values.contains_key(key) {
                Ok(())
            } else {
                Err(RepositoryError::NotFound)
            }
        }
    }

    #[tokio::test]
    async fn test_precedence_env_over_keychain() {
        let env = MockProvider::new(SecretSource::Environment, false)
            .with_value("GEMINI_API_KEY", "env-value");
        let keychain = MockProvider::new(SecretSource::Keychain, true)
            .with_value("GEMINI_API_KEY", "keychain-value");

        let service = SecretService::new(vec![Arc::new(env), Arc::new(keychain)]);

        let resolved = service.resolve("GEMINI_API_KEY").await.unwrap().unwrap();
        assert_eq!(resolved.value, "env-value");
        assert_eq!(resolved.source, SecretSource::Environment);
    }

    #[tokio::test]
    async fn test_fallback_to_keychain_when_env_missing() {
        let env = MockProvider::new(SecretSource::Environment, false);
        let keychain = MockProvider::new(SecretSource::Keychain, true)
            .with_value("GEMINI_API_KEY", "keychain-value");

        let service = SecretService::new(vec![Arc::new(env), Arc::new(keychain)]);

        let value = service.get_secret("GEMINI_API_KEY").await.unwrap();
        assert_eq!(value, Some("keychain-value".to_string()));
    }

    #[tokio::test]
    async fn test_missing_everywhere_is_none() {
        let service = SecretService::new(vec![Arc::new(MockProvider::new(
            SecretSource::Environment,
            false,
        ))]);
        assert!(service.get_secret("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_skips_readonly_provider() {
        let env = MockProvider::new(SecretSource::Environment, false);
        let keychain = MockProvider::new(SecretSource::Keychain, true);

        let service = SecretService::new(vec![Arc::new(env), Arc::new(keychain)]);

        let source = service.set_secret("NEW_KEY", "value").await.unwrap();
        assert_eq!(source, SecretSource::Keychain);
    }

    #[tokio::test]
    async fn test_set_fails_when_no_writable_provider() {
        let env = MockProvider::new(SecretSource::Environment, false);
        let service = SecretService::new(vec![Arc::new(env)]);
        assert!(service.set_secret("KEY", "value").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_returns_not_found() {
        let keychain = MockProvider::new(SecretSource::Keychain, true);
        let service = SecretService::new(vec![Arc::new(keychain)]);
        assert!(matches!(
            service.delete_secret("NONEXISTENT").await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn test_resolved_secret_debug_hides_value() {
        let resolved = ResolvedSecret {
            value: "sk-abc123xyz".to_string(),
            source: SecretSource::Keychain,
        };
        assert!(!format!("{resolved:?}").contains("abc123xyz"));
    }

    #[test]
    fn test_mask_secret_long() {
        assert_eq!(SecretService::mask_secret("sk-abcdefghijklmnop"), "****mnop");
    }

    #[test]
    fn test_mask_secret_short() {
        assert_eq!(SecretService::mask_secret("abcd"), "****");
        assert_eq!(SecretService::mask_secret(""), "****");
    }
}
