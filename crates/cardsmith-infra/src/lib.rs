//! Infrastructure layer for Cardsmith.
//!
//! Implements the ports defined in `cardsmith-core`: the SQLite blob store,
//! OS keychain and environment secret providers, LLM providers, the local
//! filesystem, and configuration loading.

pub mod config;
pub mod filesystem;
pub mod keychain;
pub mod llm;
pub mod secret;
pub mod sqlite;
