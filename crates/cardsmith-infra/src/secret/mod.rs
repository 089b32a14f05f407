//! Secret provider implementations.
//!
//! - `env`: environment variables (read-only, highest priority)
//! - `chain`: wires the providers together for `SecretService`
//!
//! The OS keychain provider lives in [`crate::keychain`].

pub mod chain;
pub mod env;
