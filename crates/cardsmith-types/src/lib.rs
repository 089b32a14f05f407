//! Shared domain types for Cardsmith.
//!
//! This crate contains the core domain types used across the workspace:
//! Card, the generation request/response shapes, configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, schemars, thiserror.

pub mod card;
pub mod config;
pub mod error;
pub mod generation;
pub mod llm;
pub mod secret;
