//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the clinic core.
//! - Apply schema migrations in deterministic order.
//! - Provide a cheap liveness check for the front end.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Managers must not read/write clinic data before migrations succeed.

use rusqlite::Connection;
use thiserror::Error;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

/// Result of a storage liveness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    /// Schema version currently applied to the database.
    pub schema_version: u32,
    /// Latest schema version known by this binary.
    pub latest_supported: u32,
}

impl HealthReport {
    /// Healthy means reachable and fully migrated.
    pub fn is_healthy(&self) -> bool {
        self.schema_version == self.latest_supported
    }
}

/// Runs a trivial query and reports the applied schema version.
pub fn health_check(conn: &Connection) -> DbResult<HealthReport> {
    conn.query_row("SELECT 1;", [], |row| row.get::<_, i64>(0))?;
    Ok(HealthReport {
        schema_version: migrations::current_user_version(conn)?,
        latest_supported: migrations::latest_version(),
    })
}
