//! User account model.
//!
//! # Invariants
//! - `password_hash` only ever holds a one-way salted hash, never plaintext.
//! - Account creation results never carry credential material.

use serde::{Deserialize, Serialize};

/// Store-generated identifier for a user row.
pub type UserId = i64;

/// Full stored user row.
///
/// Returned by username lookup so the external authentication flow can
/// verify a login attempt against the stored hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// PHC-format Argon2id string from the `password` column.
    pub password_hash: String,
}

/// Account creation result: identifier and username only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: UserId,
    pub username: String,
}
