//! Storage gateway: repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Keep SQL details inside the persistence boundary.
//! - Report uniqueness violations as a typed failure, distinct from other
//!   storage errors.
//!
//! # Invariants
//! - Repositories are only built on migrated connections (`try_new`).
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use rusqlite::{ffi, Connection};
use thiserror::Error;

pub mod pet_repo;
pub mod vet_repo;
pub mod visit_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all clinic tables.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("connection schema version {actual_version} is behind expected {expected_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(err, message) = &value {
            if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE {
                return Self::UniqueViolation(
                    message.clone().unwrap_or_else(|| err.to_string()),
                );
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that are not migrated or lack `table`.
pub(crate) fn ensure_connection_ready(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}
