//! Fixture document loading
//!
//! `.yaml` / `.yml` files are read as YAML, everything else as JSON. Both
//! land in the same `FixtureDocument`, so the smart-home defaults apply to
//! either format.

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::Path;

use seedbed_core::model::FixtureDocument;

use crate::errors::{fixture_error, io_error, Result};

/// Load a fixture document from a path
pub fn load_fixtures(path: &Path) -> Result<FixtureDocument> {
    let content = fs::read_to_string(path)
        .map_err(|e| io_error("load_fixtures", e).with_file_name(path.display().to_string()))?;

    if is_yaml(path) {
        parse_yaml(&content)
    } else {
        FixtureDocument::from_json_str(&content)
    }
}

/// Parse a YAML fixture document
pub fn parse_yaml(content: &str) -> Result<FixtureDocument> {
    serde_yaml::from_str(content).map_err(|e| fixture_error(format!("YAML parse error: {}", e)))
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
