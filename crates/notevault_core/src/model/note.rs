//! Note domain model.
//!
//! # Responsibility
//! - Define the stored note record and the write-side draft input.
//! - Own the lenient tags coercion rule for drafts.
//!
//! # Invariants
//! - `tags` on a stored record is always a sequence, never null.
//! - A draft without tags persists as the empty sequence.
//! - Tag order is preserved exactly as given by the caller.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Store-generated identifier for a note row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = i64;

/// Stored note record, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-generated primary key. The single canonical identifier;
    /// boundary adapters rename it when a consumer needs another field name.
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Decoded from the JSON text column. A NULL column decodes to empty.
    pub tags: Vec<String>,
    /// Owning user. Every read/update/delete is scoped by this id.
    pub user_id: UserId,
    /// Insert timestamp in epoch milliseconds, set by the store.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Write-side input for note create/update.
///
/// Update semantics are full replacement: title, content, and tags are
/// always applied together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    /// Absent tags are stored as the empty sequence, never as NULL.
    pub tags: Option<Vec<String>>,
}

impl NoteDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Option<Vec<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags,
        }
    }

    /// Tags as they will be persisted: absent input coerces to empty.
    pub fn storage_tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}
