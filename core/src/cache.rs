use std::collections::HashMap;

use crate::models::{Folder, Note};

/// In-memory mirror of the persisted folder/note hierarchy used for
/// rendering.
///
/// Only the store mutates it, and only after the corresponding database
/// write has committed; readers therefore never observe uncommitted state.
/// Lists keep insertion order — renaming or saving a note never moves it.
#[derive(Debug, Clone, Default)]
pub struct TreeCache {
    folders: Vec<Folder>,
    notes: HashMap<i64, Vec<Note>>,
}

impl TreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// All folders in creation order
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Get a folder by id
    pub fn folder(&self, folder_id: i64) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == folder_id)
    }

    /// Notes in a folder, creation order. After `load_all` every folder has
    /// a list (possibly empty), so the UI can render "no notes" without
    /// null checks.
    pub fn notes_in(&self, folder_id: i64) -> &[Note] {
        self.notes.get(&folder_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Find a note by id across all folder lists
    pub fn find_note(&self, note_id: i64) -> Option<&Note> {
        self.notes
            .values()
            .flat_map(|notes| notes.iter())
            .find(|n| n.id == note_id)
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub(crate) fn replace_all(&mut self, folders: Vec<Folder>, notes: HashMap<i64, Vec<Note>>) {
        self.folders = folders;
        self.notes = notes;
        // Every folder must have a notes entry, even when it holds none
        for folder in &self.folders {
            self.notes.entry(folder.id).or_default();
        }
    }

    pub(crate) fn push_folder(&mut self, folder: Folder) {
        self.notes.entry(folder.id).or_default();
        self.folders.push(folder);
    }

    /// Remove a folder and its note list; returns the ids of the removed
    /// notes so callers can reconcile derived state.
    pub(crate) fn remove_folder(&mut self, folder_id: i64) -> Vec<i64> {
        self.folders.retain(|f| f.id != folder_id);
        self.notes
            .remove(&folder_id)
            .map(|notes| notes.into_iter().map(|n| n.id).collect())
            .unwrap_or_default()
    }

    pub(crate) fn push_note(&mut self, note: Note) {
        self.notes.entry(note.folder_id).or_default().push(note);
    }

    pub(crate) fn remove_note(&mut self, folder_id: i64, note_id: i64) {
        if let Some(notes) = self.notes.get_mut(&folder_id) {
            notes.retain(|n| n.id != note_id);
        }
    }

    /// Replace a note's title wherever it lives; the owning folder is not
    /// known to the caller. Returns false when the note is not cached.
    pub(crate) fn set_note_title(&mut self, note_id: i64, title: &str) -> bool {
        match self.find_note_mut(note_id) {
            Some(note) => {
                note.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Replace a note's content wherever it lives
    pub(crate) fn set_note_content(&mut self, note_id: i64, content: &str) -> bool {
        match self.find_note_mut(note_id) {
            Some(note) => {
                note.content = content.to_string();
                true
            }
            None => false,
        }
    }

    fn find_note_mut(&mut self, note_id: i64) -> Option<&mut Note> {
        self.notes
            .values_mut()
            .flat_map(|notes| notes.iter_mut())
            .find(|n| n.id == note_id)
    }
}
