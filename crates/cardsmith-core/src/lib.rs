//! Business logic and port definitions for Cardsmith.
//!
//! This crate owns the card collection, the selection state machine, the
//! instruction assembly pipeline and the generation gateway. It defines the
//! "ports" (traits) that the infrastructure layer implements and depends only
//! on `cardsmith-types` -- never on `cardsmith-infra` or any database/IO crate.

pub mod card;
pub mod generation;
pub mod llm;
pub mod repository;
pub mod service;
pub mod storage;
pub mod studio;
