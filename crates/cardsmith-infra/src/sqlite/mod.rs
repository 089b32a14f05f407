//! SQLite storage layer.
//!
//! Port implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod blob;
pub mod pool;
