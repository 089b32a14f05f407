//! Services that orchestrate ports (use cases).
//!
//! They depend on traits -- never on concrete infrastructure implementations.

pub mod fs;
pub mod secret;
