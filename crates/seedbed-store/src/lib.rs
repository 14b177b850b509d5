//! Seedbed Store - SQLite content backend
//!
//! Provides:
//! - SQLite schema with migrations framework
//! - Content-addressed blob storage for uploaded files
//! - `SqliteBackend` implementing the seeding ports
//! - Fixture document loading (JSON or YAML)

pub mod backend;
pub mod cas;
pub mod db;
mod digest;
pub mod errors;
pub mod fixtures;
pub mod migrations;

// Re-export key types
pub use backend::SqliteBackend;
pub use errors::Result;
