//! Entry creation with per-record failure isolation

use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use crate::log_op_error;
use crate::model::FixtureRecord;
use crate::ports::ContentService;
use crate::seed::report::EntryOutcome;

/// Create one entry; a failure is logged with its payload and captured
///
/// Never returns an error, so one bad fixture does not stop its siblings.
pub async fn create_entry(content: &dyn ContentService, record: FixtureRecord) -> EntryOutcome {
    let start = Instant::now();
    let content_type = record.content_type();
    let payload = record.fields().clone();

    match content
        .create_entry(content_type, record.into_fields(), content_type.publication())
        .await
    {
        Ok(id) => {
            debug!(content_type = %content_type, entry_id = id, "entry created");
            EntryOutcome::created(content_type, id)
        }
        Err(err) => {
            let err = err.with_content_type(content_type.as_str());
            let entry = Value::Object(payload).to_string();
            log_op_error!(
                "create_entry",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                content_type = content_type.as_str(),
                entry = entry.as_str()
            );
            EntryOutcome::failed(content_type, err)
        }
    }
}
