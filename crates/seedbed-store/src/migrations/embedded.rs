//! SQL migrations compiled into the binary, in application order

use crate::digest::sha256_hex;

pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

impl Migration {
    /// Recorded on apply; a later mismatch means the SQL was edited
    pub fn checksum(&self) -> String {
        sha256_hex(self.sql.as_bytes())
    }
}

pub const MIGRATIONS: &[Migration] = &[Migration {
    id: "001_content_schema",
    sql: include_str!("../../migrations/001_content_schema.sql"),
}];
