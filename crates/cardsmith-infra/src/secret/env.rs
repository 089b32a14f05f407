//! Environment variable secret provider.
//!
//! Read-only and first in the resolution chain: a variable named after the
//! secret (e.g. `GEMINI_API_KEY`) overrides anything stored in the keychain.

use cardsmith_core::repository::secret::SecretProvider;
use cardsmith_types::error::RepositoryError;
use cardsmith_types::secret::SecretSource;

/// `set()` and `delete()` always fail: environment variables cannot be
/// persisted from inside the process.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for EnvSecretProvider {
    fn source(&self) -> SecretSource {
        SecretSource::Environment
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Ok(Some(val)),
            // Present but blank, or not valid Unicode: treat as unset.
            Ok(_) | Err(std::env::VarError::NotPresent) | Err(std::env::VarError::NotUnicode(_)) => {
                Ok(None)
            }
        }
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Query(
            "environment variable provider is read-only".to_string(),
        ))
    }

    async fn delete(&self, _key: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Query(
            "environment variable provider is read-only".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_env_provider_get_existing() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("CARDSMITH_TEST_SECRET_1", "test-value-123") };

        let provider = EnvSecretProvider::new();
        let result = provider.get("CARDSMITH_TEST_SECRET_1").await.unwrap();
        assert_eq!(result, Some("test-value-123".to_string()));

        // SAFETY: set above, unique to this test.
        unsafe { std::env::remove_var("CARDSMITH_TEST_SECRET_1") };
    }

    #[tokio::test]
    async fn test_env_provider_blank_is_unset() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("CARDSMITH_TEST_SECRET_BLANK", "  ") };

        let provider = EnvSecretProvider::new();
        assert!(provider.get("CARDSMITH_TEST_SECRET_BLANK").await.unwrap().is_none());

        // SAFETY: set above, unique to this test.
        unsafe { std::env::remove_var("CARDSMITH_TEST_SECRET_BLANK") };
    }

    #[tokio::test]
    async fn test_env_provider_get_missing() {
        let provider = EnvSecretProvider::new();
        let result = provider.get("NONEXISTENT_VAR_XYZ_123").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_env_provider_is_read_only() {
        let provider = EnvSecretProvider::new();
        assert!(provider.set("KEY", "value").await.is_err());
        assert!(provider.delete("KEY").await.is_err());
        assert_eq!(SecretProvider::source(&provider), SecretSource::Environment);
    }
}
