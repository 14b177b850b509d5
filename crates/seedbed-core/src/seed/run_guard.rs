//! Run-once guard
//!
//! The flag is read and then unconditionally set in two separate calls.
//! Two processes starting at the same instant could both observe a fresh
//! environment; the loader is only ever started by one bootstrap process.

use serde_json::Value;
use std::sync::Arc;

use crate::errors::{ExError, Result, SeedError};
use crate::ports::{KeyValueStore, StoreScope};

pub const RUN_FLAG_KEY: &str = "initHasRun";

pub struct RunGuard {
    kv: Arc<dyn KeyValueStore>,
    scope: StoreScope,
}

impl RunGuard {
    pub fn new(kv: Arc<dyn KeyValueStore>, environment: impl Into<String>) -> Self {
        Self {
            kv,
            scope: StoreScope::setup(environment),
        }
    }

    pub fn scope(&self) -> &StoreScope {
        &self.scope
    }

    /// Returns whether a previous run already happened, marking this one
    ///
    /// The returned value is the flag as observed before the write.
    pub async fn has_run_already(&self) -> Result<bool> {
        let previous = self
            .kv
            .get(&self.scope, RUN_FLAG_KEY)
            .await
            .map_err(run_state_error)?;

        self.kv
            .set(&self.scope, RUN_FLAG_KEY, Value::Bool(true))
            .await
            .map_err(run_state_error)?;

        Ok(previous.as_ref().is_some_and(is_truthy))
    }

    /// Read the flag without marking the run (status reporting)
    pub async fn peek(&self) -> Result<bool> {
        let current = self
            .kv
            .get(&self.scope, RUN_FLAG_KEY)
            .await
            .map_err(run_state_error)?;
        Ok(current.as_ref().is_some_and(is_truthy))
    }
}

/// Stored flags written by other tools may not be booleans
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn run_state_error(err: ExError) -> ExError {
    ExError::from(SeedError::RunStateUnavailable {
        reason: err.message().to_string(),
    })
    .with_source(err)
}
