//! Interactive studio session.
//!
//! One long-lived `Studio` per session: browse the collection, toggle cards
//! into the deck, draw and forge new cards, build and iterate on a site, and
//! export it. Entry point: `loop_runner::run_studio_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
