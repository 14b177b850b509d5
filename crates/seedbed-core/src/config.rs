//! Seeding configuration
//!
//! Paths are relative to the working directory unless absolute. The CLI
//! layers defaults, an optional config file, `SEEDBED_*` environment
//! variables and flags on top of `SeedConfig::default()`.

use serde::Deserialize;
use std::path::PathBuf;

use crate::logging_facility::Profile;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Deployment environment the run-once flag is scoped to
    pub environment: String,
    /// SQLite database of the content backend
    pub database: PathBuf,
    /// Directory of seed files referenced by fixtures
    pub uploads_dir: PathBuf,
    /// Fixture document (JSON or YAML)
    pub fixtures: PathBuf,
    /// Directory the backend stores uploaded blobs in
    pub blob_dir: PathBuf,
    pub log_profile: Profile,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            database: PathBuf::from(".seedbed/content.db"),
            uploads_dir: PathBuf::from("data/uploads"),
            fixtures: PathBuf::from("data/data.json"),
            blob_dir: PathBuf::from(".seedbed/blobs"),
            log_profile: Profile::Development,
        }
    }
}
