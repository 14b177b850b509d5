#![allow(clippy::result_large_err)]

use std::collections::HashMap;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::embedded::{Migration, MIGRATIONS};

const CREATE_SCHEMA_VERSION: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    migration_id TEXT NOT NULL UNIQUE,
    applied_at INTEGER NOT NULL,
    checksum TEXT
)";

/// Bring the schema up to date, returning the ids applied by this call
pub fn apply_migrations(conn: &mut Connection) -> Result<Vec<&'static str>> {
    conn.execute(CREATE_SCHEMA_VERSION, [])
        .map_err(from_rusqlite)?;
    let recorded = recorded_checksums(conn)?;

    let mut applied = Vec::new();
    for migration in MIGRATIONS {
        let checksum = migration.checksum();
        match recorded.get(migration.id) {
            Some(Some(expected)) if *expected != checksum => {
                return Err(checksum_mismatch(migration.id, expected, &checksum));
            }
            Some(_) => debug!(migration_id = migration.id, "migration already applied"),
            None => {
                apply_one(conn, migration, &checksum)?;
                applied.push(migration.id);
            }
        }
    }

    if !applied.is_empty() {
        info!(count = applied.len(), "migrations applied");
    }
    Ok(applied)
}

/// True if every embedded migration has been recorded; never writes
pub fn is_current(conn: &Connection) -> Result<bool> {
    let has_table: bool = conn
        .query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;
    if !has_table {
        return Ok(false);
    }
    let recorded = recorded_checksums(conn)?;
    Ok(MIGRATIONS.iter().all(|m| recorded.contains_key(m.id)))
}

fn recorded_checksums(conn: &Connection) -> Result<HashMap<String, Option<String>>> {
    let mut stmt = conn
        .prepare("SELECT migration_id, checksum FROM schema_version")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })
        .map_err(from_rusqlite)?;
    rows.collect::<std::result::Result<_, _>>()
        .map_err(from_rusqlite)
}

fn apply_one(conn: &mut Connection, migration: &Migration, checksum: &str) -> Result<()> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration.id, chrono::Utc::now().timestamp(), checksum],
    )
    .map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    info!(migration_id = migration.id, "migration applied");
    Ok(())
}
