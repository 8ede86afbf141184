//! Persisted key-value store (SQLite via sqlx).
//!
//! Holds the installation identifier, discovered control endpoint, resolved
//! target link, client identifier and push token under a named namespace.

pub mod db;
mod ops;
pub mod types;

pub use db::*;
pub use types::*;

#[cfg(test)]
mod tests;
