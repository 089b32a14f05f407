use serde::{Deserialize, Serialize};

use std::fmt;

/// Storage backend a secret was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretSource {
    /// OS keychain (macOS Keychain / Linux Secret Service).
    Keychain,
    /// Environment variable.
    Environment,
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::Keychain => write!(f, "keychain"),
            SecretSource::Environment => write!(f, "environment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_source_display() {
        assert_eq!(SecretSource::Keychain.to_string(), "keychain");
        assert_eq!(SecretSource::Environment.to_string(), "environment");
    }

    #[test]
    fn test_secret_source_serde() {
        let json = serde_json::to_string(&SecretSource::Environment).unwrap();
        assert_eq!(json, "\"environment\"");
    }
}
