//! Secret provider trait definition.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use cardsmith_types::error::RepositoryError;
use cardsmith_types::secret::SecretSource;

/// Trait for secret storage backends (keychain, environment).
///
/// Each provider stores and retrieves secret values. The `SecretService`
/// chains multiple providers in priority order.
pub trait SecretProvider: Send + Sync {
    /// Which backend this provider reads from.
    fn source(&self) -> SecretSource;

    /// Retrieve a secret value by key.
    /// Returns None if the secret does not exist in this provider.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, RepositoryError>> + Send;

    /// Store a secret value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a secret.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

type BoxedFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Object-safe version of [`SecretProvider`] with boxed futures.
pub trait SecretProviderDyn: Send + Sync {
    fn source(&self) -> SecretSource;

    fn get_boxed<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, Option<String>>;

    fn set_boxed<'a>(&'a self, key: &'a str, value: &'a str) -> BoxedFuture<'a, ()>;

    fn delete_boxed<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, ()>;
}

impl<T: SecretProvider> SecretProviderDyn for T {
    fn source(&self) -> SecretSource {
        SecretProvider::source(self)
    }

    fn get_boxed<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, Option<String>> {
        Box::pin(self.get(key))
    }

    fn set_boxed<'a>(&'a self, key: &'a str, value: &'a str) -> BoxedFuture<'a, ()> {
        Box::pin(self.set(key, value))
    }

    fn delete_boxed<'a>(&'a self, key: &'a str) -> BoxedFuture<'a, ()> {
        Box::pin(self.delete(key))
    }
}

/// Shared, type-erased secret provider used in provider chains.
pub type DynSecretProvider = Arc<dyn SecretProviderDyn>;
