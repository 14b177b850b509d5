//! Layered configuration
//!
//! `SeedConfig` defaults, then `seedbed.toml` (or `--config`), then
//! `SEEDBED_*` environment variables. Command-line flags are applied on top
//! by the commands themselves.

use config::{Config, ConfigError, Environment, File};
use seedbed_core::SeedConfig;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "seedbed.toml";
pub const ENV_PREFIX: &str = "SEEDBED";

/// Load configuration from the optional file and the process environment
pub fn load(config_path: Option<&Path>) -> Result<SeedConfig, ConfigError> {
    load_with_env(config_path, None)
}

/// Load configuration; `env` replaces the process environment when given
///
/// An explicit `config_path` must exist, the default file is optional.
pub fn load_with_env(
    config_path: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<SeedConfig, ConfigError> {
    let file = match config_path {
        Some(path) => File::from(path).required(true),
        None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
    };

    Config::builder()
        .add_source(file)
        // e.g. SEEDBED_ENVIRONMENT=production, SEEDBED_LOG_PROFILE=production
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        )
        .build()?
        .try_deserialize()
}
