//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD persistence for notes.
//! - Own the JSON codec for the `notes.tags` text column.
//!
//! # Invariants
//! - Every read/update/delete filters by note id AND owning user id; a note
//!   under another owner is indistinguishable from an absent one.
//! - A NULL tags column decodes to the empty sequence; malformed JSON is
//!   rejected as invalid data instead of being masked.
//! - List order is `createdAt DESC, id DESC` (newest first, insertion order
//!   breaking same-millisecond ties).

use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::user::UserId;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use log::error;
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    tags,
    user_id,
    createdAt
FROM notes";

const NOTE_COLUMNS: &[&str] = &["id", "title", "content", "tags", "user_id", "createdAt"];

/// Repository interface for owner-scoped note CRUD.
pub trait NoteRepository {
    /// Lists all notes owned by `user_id`, newest first. An empty result is
    /// a normal outcome.
    fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<Note>>;
    /// Gets one note by id, scoped to its owner.
    fn get(&self, id: NoteId, user_id: UserId) -> RepoResult<Option<Note>>;
    /// Inserts one note and returns the stored row in the same shape `get`
    /// produces.
    fn create(&self, draft: &NoteDraft, user_id: UserId) -> RepoResult<Note>;
    /// Overwrites title, content, and tags together. Returns `None` without
    /// mutating anything when the note does not exist under this owner.
    fn update(&self, id: NoteId, draft: &NoteDraft, user_id: UserId)
        -> RepoResult<Option<Note>>;
    /// Deletes one note and returns the pre-deletion snapshot, or `None`
    /// when the note does not exist under this owner.
    fn delete(&self, id: NoteId, user_id: UserId) -> RepoResult<Option<Note>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "notes", NOTE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<Note>> {
        self.select_for_user(user_id).map_err(|err| {
            error!("event=note_list module=repo status=error user_id={user_id} error={err}");
            err
        })
    }

    fn get(&self, id: NoteId, user_id: UserId) -> RepoResult<Option<Note>> {
        self.select_scoped(id, user_id).map_err(|err| {
            error!(
                "event=note_get module=repo status=error note_id={id} user_id={user_id} error={err}"
            );
            err
        })
    }

    fn create(&self, draft: &NoteDraft, user_id: UserId) -> RepoResult<Note> {
        self.insert(draft, user_id).map_err(|err| {
            error!("event=note_create module=repo status=error user_id={user_id} error={err}");
            err
        })
    }

    fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
        user_id: UserId,
    ) -> RepoResult<Option<Note>> {
        self.overwrite(id, draft, user_id).map_err(|err| {
            error!(
                "event=note_update module=repo status=error note_id={id} user_id={user_id} error={err}"
            );
            err
        })
    }

    fn delete(&self, id: NoteId, user_id: UserId) -> RepoResult<Option<Note>> {
        self.remove(id, user_id).map_err(|err| {
            error!(
                "event=note_delete module=repo status=error note_id={id} user_id={user_id} error={err}"
            );
            err
        })
    }
}

impl SqliteNoteRepository<'_> {
    fn select_for_user(&self, user_id: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY createdAt DESC, id DESC;"
        ))?;

        let mut rows = stmt.query([user_id])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn select_scoped(&self, id: NoteId, user_id: UserId) -> RepoResult<Option<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE id = ?1
               AND user_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id, user_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, draft: &NoteDraft, user_id: UserId) -> RepoResult<Note> {
        self.conn.execute(
            "INSERT INTO notes (title, content, tags, user_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.title,
                draft.content,
                encode_tags(draft.storage_tags())?,
                user_id,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.select_scoped(id, user_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("note {id} missing on read-back after insert"))
        })
    }

    fn overwrite(
        &self,
        id: NoteId,
        draft: &NoteDraft,
        user_id: UserId,
    ) -> RepoResult<Option<Note>> {
        if self.select_scoped(id, user_id)?.is_none() {
            return Ok(None);
        }

        self.conn.execute(
            "UPDATE notes
             SET title = ?1, content = ?2, tags = ?3
             WHERE id = ?4
               AND user_id = ?5;",
            params![
                draft.title,
                draft.content,
                encode_tags(draft.storage_tags())?,
                id,
                user_id,
            ],
        )?;

        self.select_scoped(id, user_id)
    }

    fn remove(&self, id: NoteId, user_id: UserId) -> RepoResult<Option<Note>> {
        let snapshot = match self.select_scoped(id, user_id)? {
            Some(note) => note,
            None => return Ok(None),
        };

        self.conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND user_id = ?2;",
            params![id, user_id],
        )?;

        Ok(Some(snapshot))
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let tags = match row.get::<_, Option<String>>("tags")? {
        Some(raw) => decode_tags(&raw)?,
        None => Vec::new(),
    };

    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        tags,
        user_id: row.get("user_id")?,
        created_at: row.get("createdAt")?,
    })
}

fn encode_tags(tags: &[String]) -> RepoResult<String> {
    serde_json::to_string(tags)
        .map_err(|err| RepoError::InvalidData(format!("tags not JSON-encodable: {err}")))
}

fn decode_tags(raw: &str) -> RepoResult<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|_| RepoError::InvalidData(format!("invalid tags JSON `{raw}` in notes.tags")))
}
