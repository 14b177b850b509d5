//! Store failures expressed as `ExError`
//!
//! Every helper tags the error with the store operation that failed so
//! log lines and CLI output point at the SQL or filesystem step involved.

use rusqlite::ErrorCode;
use seedbed_core::errors::{ExError, ExErrorKind, SeedError};

pub type Result<T> = std::result::Result<T, ExError>;

fn persistence(op: &str, message: String) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op(op)
        .with_message(message)
}

pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    persistence("migration", format!("{} did not apply: {}", migration_id, reason))
}

/// The SQL of an applied migration no longer matches what was recorded
pub fn checksum_mismatch(migration_id: &str, recorded: &str, embedded: &str) -> ExError {
    persistence(
        "migration_checksum",
        format!(
            "{} was edited after being applied (recorded {}, embedded {})",
            migration_id, recorded, embedded
        ),
    )
}

/// Same digest, different bytes on disk
pub fn blob_collision(digest: &str) -> ExError {
    ExError::new(ExErrorKind::AlreadyExists)
        .with_op("blob_write")
        .with_message(format!("blob {} exists with different content", digest))
}

pub fn blob_missing(digest: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("blob_read")
        .with_message(format!("no blob stored under {}", digest))
}

pub fn fixture_error(reason: impl Into<String>) -> ExError {
    SeedError::InvalidFixture {
        reason: reason.into(),
    }
    .into()
}

/// Constraint violations (duplicate slug, second single-type entry) become
/// `AlreadyExists`, any other SQLite failure `Persistence`
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            ExErrorKind::AlreadyExists
        }
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

pub fn io_error(op: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(op)
        .with_message(err.to_string())
}

/// Another thread panicked while holding the connection
pub fn poisoned() -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("sqlite")
        .with_message("connection lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_violation_is_already_exists() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (slug TEXT UNIQUE); INSERT INTO t VALUES ('news');")
            .unwrap();

        let err = conn
            .execute("INSERT INTO t VALUES ('news')", [])
            .map_err(from_rusqlite)
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
        assert_eq!(err.op(), Some("sqlite"));
    }

    #[test]
    fn test_other_failures_are_persistence() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn
            .execute("INSERT INTO missing VALUES (1)", [])
            .map_err(from_rusqlite)
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::Persistence);
    }
}
