use std::collections::HashMap;

use chrono::Utc;
use log::warn;

use crate::cache::TreeCache;
use crate::models::{Folder, Note};
use crate::storage::{Connection, FolderRepository, NoteRepository};
use crate::{Error, Result};

/// Note deletions accumulated before a VACUUM pass.
const NOTE_DELETE_COMPACT_THRESHOLD: u32 = 10;
/// Folder deletions accumulated before a VACUUM pass.
const FOLDER_DELETE_COMPACT_THRESHOLD: u32 = 4;

/// Outcome of a committed store mutation. The editor state controller folds
/// these into its derived state (selection, expansion, menus) instead of
/// being handed a bundle of individual mutators.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    FolderCreated { folder: Folder },
    /// Carries the ids of the notes that went down with the folder, so a
    /// dangling selection or menu can be cleared.
    FolderDeleted { folder_id: i64, note_ids: Vec<i64> },
    NoteCreated { note: Note },
    NoteRenamed { note_id: i64, title: String },
    NoteSaved { note_id: i64 },
    NoteDeleted { note_id: i64, folder_id: i64 },
    Reloaded,
}

/// Store access layer: translates UI intents into database mutations while
/// keeping the [`TreeCache`] authoritative copy in sync.
///
/// Every mutation writes to the database first and touches the cache only
/// after the write commits. A failed write leaves the cache in its
/// last-known-good state; a committed write always updates the cache before
/// returning. Mutations take `&mut self`, so no two can interleave.
pub struct NoteStore {
    conn: Connection,
    cache: TreeCache,
    notes_deleted: u32,
    folders_deleted: u32,
}

impl NoteStore {
    /// Wrap an open connection. The cache starts empty; call
    /// [`NoteStore::load_all`] before rendering.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            cache: TreeCache::new(),
            notes_deleted: 0,
            folders_deleted: 0,
        }
    }

    pub fn cache(&self) -> &TreeCache {
        &self.cache
    }

    /// Deletions since the last compaction pass: (notes, folders)
    pub fn deletions_since_compaction(&self) -> (u32, u32) {
        (self.notes_deleted, self.folders_deleted)
    }

    /// Read the whole folder/note tree into the cache. The only bulk
    /// operation and the required initialization path: afterwards every
    /// folder has a note list, possibly empty.
    pub fn load_all(&mut self) -> Result<StoreEvent> {
        let folders = FolderRepository::get_all(&self.conn)?;
        let mut notes = HashMap::new();
        for folder in &folders {
            notes.insert(folder.id, NoteRepository::get_by_folder(&self.conn, folder.id)?);
        }

        self.cache.replace_all(folders, notes);
        Ok(StoreEvent::Reloaded)
    }

    /// Create a folder with a trimmed, non-empty, unique name.
    pub fn create_folder(&mut self, name: &str) -> Result<StoreEvent> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Folder name cannot be empty".to_string()));
        }
        if FolderRepository::get_by_name(&self.conn, name)?.is_some() {
            return Err(Error::Duplicate(
                "A folder with this name already exists".to_string(),
            ));
        }

        let folder = FolderRepository::insert(&self.conn, name, &Utc::now())?;
        self.cache.push_folder(folder.clone());

        Ok(StoreEvent::FolderCreated { folder })
    }

    /// Delete a folder and everything it contains. A no-op unless the
    /// caller has obtained explicit user confirmation.
    ///
    /// Notes are deleted before the folder row — the store does not
    /// cascade, and the reverse order would orphan notes. Both steps run in
    /// one transaction; failure at either leaves the cache untouched.
    pub fn delete_folder(&mut self, folder_id: i64, confirmed: bool) -> Result<Option<StoreEvent>> {
        if !confirmed {
            return Ok(None);
        }

        let tx = self.conn.unchecked_transaction()?;
        NoteRepository::delete_by_folder(&tx, folder_id)?;
        FolderRepository::delete(&tx, folder_id)?;
        tx.commit()?;

        let note_ids = self.cache.remove_folder(folder_id);
        self.folders_deleted += 1;
        self.maybe_compact();

        Ok(Some(StoreEvent::FolderDeleted { folder_id, note_ids }))
    }

    /// Create a note with placeholder content derived from its title.
    pub fn create_note(&mut self, title: &str, folder_id: i64) -> Result<StoreEvent> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("Note title cannot be empty".to_string()));
        }

        let content = Note::default_content(title);
        let note = NoteRepository::insert(&self.conn, title, &content, folder_id, &Utc::now())?;
        self.cache.push_note(note.clone());

        Ok(StoreEvent::NoteCreated { note })
    }

    /// Rename a note. The owning folder is not passed; the cache entry is
    /// located by searching every folder list.
    pub fn rename_note(&mut self, note_id: i64, new_title: &str) -> Result<StoreEvent> {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Err(Error::Validation("Note title cannot be empty".to_string()));
        }

        NoteRepository::update_title(&self.conn, note_id, new_title)?;
        if !self.cache.set_note_title(note_id, new_title) {
            warn!("renamed note {} is not in the tree cache", note_id);
        }

        Ok(StoreEvent::NoteRenamed {
            note_id,
            title: new_title.to_string(),
        })
    }

    /// Overwrite a note's content. Idempotent: repeated saves with the same
    /// content produce the same final state.
    pub fn save_note(&mut self, note_id: i64, new_content: &str) -> Result<StoreEvent> {
        NoteRepository::update_content(&self.conn, note_id, new_content)?;
        if !self.cache.set_note_content(note_id, new_content) {
            warn!("saved note {} is not in the tree cache", note_id);
        }

        Ok(StoreEvent::NoteSaved { note_id })
    }

    /// Delete a single note.
    pub fn delete_note(&mut self, note_id: i64, folder_id: i64) -> Result<StoreEvent> {
        NoteRepository::delete(&self.conn, note_id)?;

        self.cache.remove_note(folder_id, note_id);
        self.notes_deleted += 1;
        self.maybe_compact();

        Ok(StoreEvent::NoteDeleted { note_id, folder_id })
    }

    /// Deletions leave reclaimable pages behind; VACUUM once enough have
    /// accumulated. Maintenance only: a failure is logged and never
    /// surfaced, and never rolls back the delete that triggered it.
    fn maybe_compact(&mut self) {
        if self.notes_deleted < NOTE_DELETE_COMPACT_THRESHOLD
            && self.folders_deleted < FOLDER_DELETE_COMPACT_THRESHOLD
        {
            return;
        }

        self.notes_deleted = 0;
        self.folders_deleted = 0;

        if let Err(e) = self.conn.execute_batch("VACUUM;") {
            warn!("Database compaction failed: {}", e);
        }
    }
}
