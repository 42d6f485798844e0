//! User account repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist account creation with one-way credential hashing.
//! - Provide username lookup for the external authentication flow.
//!
//! # Invariants
//! - Plaintext passwords are hashed before the insert and never stored or
//!   returned.
//! - A `users.username` unique-constraint violation surfaces as the distinct
//!   `UsernameTaken` condition, not a generic storage error.
//! - Creation results carry id and username only, never the hash.

use crate::auth::password::hash_password;
use crate::db::DbError;
use crate::model::user::{CreatedUser, User, UserId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use log::{error, warn};
use rusqlite::{params, Connection, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    password
FROM users";

const USER_COLUMNS: &[&str] = &["id", "username", "password"];

/// Repository interface for account creation and lookup.
pub trait UserRepository {
    /// Hashes the password, inserts the account, and returns id + username.
    fn create(&self, username: &str, password: &str) -> RepoResult<CreatedUser>;
    /// Returns the full stored row (hash included) or `None`.
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "users", USER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create(&self, username: &str, password: &str) -> RepoResult<CreatedUser> {
        match self.insert(username, password) {
            Ok(created) => Ok(created),
            Err(err @ RepoError::UsernameTaken(_)) => {
                warn!("event=user_create module=repo status=conflict username={username}");
                Err(err)
            }
            Err(err) => {
                error!(
                    "event=user_create module=repo status=error username={username} error={err}"
                );
                Err(err)
            }
        }
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.select_by_username(username).map_err(|err| {
            error!("event=user_find module=repo status=error username={username} error={err}");
            err
        })
    }
}

impl SqliteUserRepository<'_> {
    fn insert(&self, username: &str, password: &str) -> RepoResult<CreatedUser> {
        let password_hash = hash_password(password).map_err(RepoError::PasswordHash)?;

        self.conn
            .execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2);",
                params![username, password_hash],
            )
            .map_err(|err| map_user_insert_error(err, username))?;

        Ok(CreatedUser {
            id: self.conn.last_insert_rowid(),
            username: username.to_string(),
        })
    }

    fn select_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE username = ?1;"))?;

        let mut rows = stmt.query([username])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password")?,
    })
}

/// Maps a `users.username` unique-constraint violation to the semantic
/// `UsernameTaken` condition; everything else stays a storage error.
fn map_user_insert_error(err: rusqlite::Error, username: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::UsernameTaken(username.to_string())
        }
        _ => RepoError::Db(DbError::Sqlite(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::map_user_insert_error;
    use crate::repo::RepoError;
    use rusqlite::ffi;

    #[test]
    fn unique_violation_maps_to_username_taken() {
        let sqlite_err = ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code: ffi::SQLITE_CONSTRAINT_UNIQUE,
        };
        let err = rusqlite::Error::SqliteFailure(sqlite_err, None);

        let mapped = map_user_insert_error(err, "alice");
        assert!(matches!(mapped, RepoError::UsernameTaken(name) if name == "alice"));
    }

    #[test]
    fn other_constraint_violations_stay_storage_errors() {
        let sqlite_err = ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code: ffi::SQLITE_CONSTRAINT_NOTNULL,
        };
        let err = rusqlite::Error::SqliteFailure(sqlite_err, None);

        let mapped = map_user_insert_error(err, "alice");
        assert!(matches!(mapped, RepoError::Db(_)));
    }
}
