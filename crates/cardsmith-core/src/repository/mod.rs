//! Repository trait definitions (ports).
//!
//! These traits define the interfaces that the infrastructure layer
//! (cardsmith-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod secret;
