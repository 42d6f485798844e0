//! Persistence core for NoteVault.
//!
//! Owner-scoped note CRUD and user account storage over SQLite, with
//! Argon2id credential hashing at account creation. This crate is the
//! in-process data-access layer: request handling and login verification
//! live in the embedding application, which injects a migrated connection
//! from [`db::open_db`] or [`db::open_db_in_memory`] into the repositories.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use auth::password::{hash_password, verify_password};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteDraft, NoteId};
pub use model::user::{CreatedUser, User, UserId};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
