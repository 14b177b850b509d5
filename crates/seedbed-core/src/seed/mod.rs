//! Run-once seeding pipeline
//!
//! Provides:
//! - Run guard over the environment's setup flag
//! - Public permission grants (the only concurrent step)
//! - Asset resolution with upload deduplication by base name
//! - Content block transformation
//! - Per-record entry creation with captured failures
//! - The `Seeder` orchestrating a full run

pub mod assets;
pub mod blocks;
pub mod entries;
pub mod files;
pub mod orchestrator;
pub mod permissions;
pub mod report;
pub mod run_guard;

pub use assets::AssetResolver;
pub use blocks::transform_blocks;
pub use entries::create_entry;
pub use files::UploadsDir;
pub use orchestrator::{Collaborators, Seeder};
pub use permissions::{grant_public_permissions, PUBLIC_ROLE};
pub use report::{EntryOutcome, ImportReport, SeedOutcome};
pub use run_guard::{RunGuard, RUN_FLAG_KEY};
