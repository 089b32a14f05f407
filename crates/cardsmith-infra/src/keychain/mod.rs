//! OS keychain adapter for secret storage.
//!
//! Uses the `keyring` crate to store secrets via the macOS Keychain, the
//! Linux Secret Service or the Windows Credential Manager. Entries live under
//! the `cardsmith` service name, keyed by secret name.

use cardsmith_core::repository::secret::SecretProvider;
use cardsmith_types::error::RepositoryError;
use cardsmith_types::secret::SecretSource;

pub struct KeychainProvider {
    service_name: String,
}

impl KeychainProvider {
    pub const SERVICE_NAME: &'static str = "cardsmith";

    pub fn new() -> Self {
        Self::with_service(Self::SERVICE_NAME)
    }

    /// Use a different service name (keeps test entries apart).
    pub fn with_service(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, RepositoryError> {
        keyring::Entry::new(&self.service_name, key)
            .map_err(|e| RepositoryError::Query(format!("keychain entry error: {e}")))
    }
}

impl Default for KeychainProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for KeychainProvider {
    fn source(&self) -> SecretSource {
        SecretSource::Keychain
    }

    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let entry = self.entry(key)?;

        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(RepositoryError::Query(format!("keychain get error: {e}"))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let entry = self.entry(key)?;

        entry
            .set_password(value)
            .map_err(|e| RepositoryError::Query(format!("keychain set error: {e}")))
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        let entry = self.entry(key)?;

        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Err(RepositoryError::NotFound),
            Err(e) => Err(RepositoryError::Query(format!("keychain delete error: {e}"))),
        }
    }
}
