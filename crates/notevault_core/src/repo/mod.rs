//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define the data-access contracts for notes and user accounts.
//! - Isolate SQL and row decoding from calling code.
//!
//! # Invariants
//! - "Row not found under this owner" is a normal `Ok(None)` outcome, never
//!   an error.
//! - Storage failures are logged with operation context, then propagated
//!   unchanged; repositories perform no retries and no local recovery.
//! - Repositories refuse to operate on a connection whose schema has not
//!   been migrated.

use crate::db::DbError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by note and user persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Transport or query failure in the storage layer.
    Db(DbError),
    /// Unique-constraint violation on `users.username`. Recoverable;
    /// callers present a specific "username taken" message.
    UsernameTaken(String),
    /// Credential hashing failed before any write was attempted.
    PasswordHash(String),
    /// Persisted state that cannot be decoded into a domain record.
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UsernameTaken(username) => {
                write!(f, "username already exists: `{username}`")
            }
            Self::PasswordHash(message) => write!(f, "password hashing failed: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; database not migrated")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(
                    f,
                    "required column `{column}` is missing from table `{table}`; database not migrated"
                )
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies that `table` exists with every column in `columns`.
///
/// Repository constructors call this so that an unmigrated connection fails
/// fast instead of surfacing as query errors mid-operation.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &'static [&'static str],
) -> RepoResult<()> {
    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
