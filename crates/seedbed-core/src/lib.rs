//! seedbed Core - run-once content seeding pipeline
//!
//! This crate provides the data model and the import pipeline that seeds a
//! content backend with example data exactly once per environment:
//! - Fixture records, asset references and polymorphic content blocks
//! - Collaborator ports for the content service, asset store, local files
//!   and key-value store
//! - Run guard, permission grantor, asset resolver, block transformer,
//!   entry importer and the orchestrating `Seeder`
//! - Structured error and logging facilities

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ports;
pub mod seed;

// Re-export commonly used types
pub use config::SeedConfig;
pub use errors::{ExError, ExErrorKind, Result, SeedError};
pub use model::{
    Action, ActionMap, AssetHandle, AssetRef, ContentBlock, ContentType, FixtureDocument,
    FixtureRecord, PermissionGrant, Resolution,
};
pub use ports::{AssetSource, AssetStore, ContentService, KeyValueStore};
pub use seed::{Collaborators, ImportReport, SeedOutcome, Seeder};

#[doc(hidden)]
pub use seedbed_core_types as core_types;
