//! The card collection and what the user does with it.

pub mod catalog;
pub mod library;
pub mod preview;
pub mod selection;
pub mod store;
