//! Secret chain builder.
//!
//! Assembles concrete providers in precedence order. The resulting chain is
//! handed to `SecretService` in cardsmith-core as [`DynSecretProvider`]s.

use std::sync::Arc;

use cardsmith_core::repository::secret::DynSecretProvider;

use crate::keychain::KeychainProvider;
use crate::secret::env::EnvSecretProvider;

/// Build the secret resolution chain, first match wins:
/// 1. Environment variables (if `include_env`)
/// 2. OS keychain (if available; headless machines may have none)
pub fn build_secret_chain(
    keychain: Option<KeychainProvider>,
    include_env: bool,
) -> Vec<DynSecretProvider> {
    let mut chain: Vec<DynSecretProvider> = Vec::new();

    if include_env {
        chain.push(Arc::new(EnvSecretProvider::new()));
    }

    if let Some(kc) = keychain {
        chain.push(Arc::new(kc));
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsmith_types::secret::SecretSource;

    #[test]
    fn test_chain_order() {
        let chain = build_secret_chain(Some(KeychainProvider::with_service("cardsmith-test")), true);
        let sources: Vec<SecretSource> = chain.iter().map(|p| p.source()).collect();
        assert_eq!(sources, [SecretSource::Environment, SecretSource::Keychain]);
    }

    #[test]
    fn test_chain_without_env_or_keychain() {
        assert!(build_secret_chain(None, false).is_empty());
        assert_eq!(build_secret_chain(None, true).len(), 1);
    }
}
