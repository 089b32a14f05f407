//! Storage abstractions for Cardsmith.
//!
//! Defines the persistence port for the card collection.
//! Implementations live in cardsmith-infra.

pub mod blob_store;
