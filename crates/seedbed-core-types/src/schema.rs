//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Seeding identifiers
pub const FIELD_CONTENT_TYPE: &str = "content_type";
pub const FIELD_FILE_NAME: &str = "file_name";
pub const FIELD_ENTRY: &str = "entry";

// Counters
pub const FIELD_CREATED: &str = "created";
pub const FIELD_FAILED: &str = "failed";
pub const FIELD_GRANTS: &str = "grants";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_SKIPPED: &str = "skipped";
