use std::collections::HashMap;

use markpad_core::{NoteStore, Result, StoreEvent};

/// Item a context menu is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    Folder(i64),
    Note(i64),
}

/// Prompt shown before a destructive delete. The desktop shell backs this
/// with a native dialog; tests substitute a canned answer.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Editor/selection state layered over the store.
///
/// The editor is either closed (`active_note` is `None`) or editing exactly
/// one note. Every store mutation flows back through [`App::apply`], which
/// reconciles selection, expansion and menu state with the tree — a deleted
/// entity can never leave a dangling reference behind.
pub struct App {
    store: NoteStore,
    /// The note open for editing, if any. Not persisted.
    pub active_note: Option<i64>,
    /// Per-folder expansion state for the sidebar.
    pub expanded: HashMap<i64, bool>,
    /// At most one context menu is open at a time.
    pub open_menu: Option<MenuTarget>,
    /// Editor contents, mirrored from the active note on selection.
    pub edit_buffer: String,
    /// True when the buffer diverges from the last-saved content. Set on
    /// every edit, cleared only by a successful save.
    pub is_edited: bool,
}

impl App {
    /// Wrap a store and load the full tree.
    pub fn new(mut store: NoteStore) -> Result<Self> {
        let event = store.load_all()?;
        let mut app = Self {
            store,
            active_note: None,
            expanded: HashMap::new(),
            open_menu: None,
            edit_buffer: String::new(),
            is_edited: false,
        };
        app.apply(&event);
        Ok(app)
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Open a note for editing. Pending edits to the previous note are
    /// dropped; the caller is expected to have saved or warned.
    pub fn select_note(&mut self, note_id: i64) {
        if let Some(note) = self.store.cache().find_note(note_id) {
            self.edit_buffer = note.content.clone();
            self.active_note = Some(note_id);
            self.is_edited = false;
        }
    }

    /// Close the editor, returning to the no-note screen.
    pub fn close_editor(&mut self) {
        self.active_note = None;
        self.edit_buffer.clear();
        self.is_edited = false;
    }

    /// Replace the editor buffer; called on every keystroke.
    pub fn edit(&mut self, text: String) {
        self.edit_buffer = text;
        self.is_edited = true;
    }

    /// Persist the buffer to the active note. A no-op when nothing changed,
    /// which also means only one save can be outstanding per note.
    pub fn save_active(&mut self) -> Result<()> {
        if !self.is_edited {
            return Ok(());
        }
        let note_id = match self.active_note {
            Some(id) => id,
            None => return Ok(()),
        };

        let event = self.store.save_note(note_id, &self.edit_buffer)?;
        self.apply(&event);
        self.is_edited = false;
        Ok(())
    }

    pub fn create_folder(&mut self, name: &str) -> Result<()> {
        let event = self.store.create_folder(name)?;
        self.apply(&event);
        Ok(())
    }

    /// Delete a folder and its notes after asking the user. Returns whether
    /// the delete actually ran.
    pub fn delete_folder(&mut self, folder_id: i64, prompt: &dyn ConfirmPrompt) -> Result<bool> {
        let confirmed = prompt.confirm("Are you sure you want to delete the folder?");
        match self.store.delete_folder(folder_id, confirmed)? {
            Some(event) => {
                self.apply(&event);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn create_note(&mut self, title: &str, folder_id: i64) -> Result<()> {
        let event = self.store.create_note(title, folder_id)?;
        self.apply(&event);
        Ok(())
    }

    pub fn rename_note(&mut self, note_id: i64, new_title: &str) -> Result<()> {
        let event = self.store.rename_note(note_id, new_title)?;
        self.apply(&event);
        Ok(())
    }

    /// Delete a note after asking the user. Returns whether the delete ran.
    pub fn delete_note(
        &mut self,
        note_id: i64,
        folder_id: i64,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<bool> {
        if !prompt.confirm("Are you sure you want to delete the note?") {
            return Ok(false);
        }
        let event = self.store.delete_note(note_id, folder_id)?;
        self.apply(&event);
        Ok(true)
    }

    /// Reload the whole tree from the store and re-reconcile derived state.
    pub fn reload(&mut self) -> Result<()> {
        let event = self.store.load_all()?;
        self.apply(&event);
        Ok(())
    }

    pub fn is_expanded(&self, folder_id: i64) -> bool {
        self.expanded.get(&folder_id).copied().unwrap_or(false)
    }

    pub fn toggle_expanded(&mut self, folder_id: i64) {
        let entry = self.expanded.entry(folder_id).or_insert(false);
        *entry = !*entry;
    }

    pub fn open_menu_for(&mut self, target: MenuTarget) {
        self.open_menu = Some(target);
    }

    pub fn close_menu(&mut self) {
        self.open_menu = None;
    }

    /// Fold a committed store mutation into derived UI state. This is the
    /// single reconciliation point: anything that disappears from the tree
    /// takes its selection, expansion entry and menu with it.
    fn apply(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::FolderCreated { folder } => {
                self.expanded.entry(folder.id).or_insert(false);
            }
            StoreEvent::FolderDeleted { folder_id, note_ids } => {
                self.expanded.remove(folder_id);
                if self
                    .active_note
                    .map_or(false, |id| note_ids.contains(&id))
                {
                    // Pending edits go down with the folder; the delete was
                    // explicitly confirmed.
                    self.close_editor();
                }
                let menu_gone = match self.open_menu {
                    Some(MenuTarget::Folder(id)) => id == *folder_id,
                    Some(MenuTarget::Note(id)) => note_ids.contains(&id),
                    None => false,
                };
                if menu_gone {
                    self.open_menu = None;
                }
            }
            StoreEvent::NoteCreated { note } => {
                // A created note must be immediately visible
                self.expanded.insert(note.folder_id, true);
            }
            StoreEvent::NoteDeleted { note_id, .. } => {
                if self.active_note == Some(*note_id) {
                    self.close_editor();
                }
                if self.open_menu == Some(MenuTarget::Note(*note_id)) {
                    self.open_menu = None;
                }
            }
            StoreEvent::NoteRenamed { .. } | StoreEvent::NoteSaved { .. } => {}
            StoreEvent::Reloaded => {
                let folder_ids: Vec<i64> = self
                    .store
                    .cache()
                    .folders()
                    .iter()
                    .map(|f| f.id)
                    .collect();
                self.expanded.retain(|id, _| folder_ids.contains(id));
                for id in folder_ids {
                    self.expanded.entry(id).or_insert(false);
                }
                if let Some(id) = self.active_note {
                    if self.store.cache().find_note(id).is_none() {
                        self.close_editor();
                    }
                }
                let menu_gone = match self.open_menu {
                    Some(MenuTarget::Folder(id)) => self.store.cache().folder(id).is_none(),
                    Some(MenuTarget::Note(id)) => self.store.cache().find_note(id).is_none(),
                    None => false,
                };
                if menu_gone {
                    self.open_menu = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markpad_core::storage::Database;
    use tempfile::tempdir;

    /// Canned confirmation answer for tests.
    struct Always(bool);

    impl ConfirmPrompt for Always {
        fn confirm(&self, _message: &str) -> bool {
            self.0
        }
    }

    fn setup_app() -> (tempfile::TempDir, App) {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("test.db"));
        let conn = db.create().unwrap();
        let app = App::new(NoteStore::new(conn)).unwrap();
        (dir, app)
    }

    fn setup_with_note(title: &str) -> (tempfile::TempDir, App, i64, i64) {
        let (dir, mut app) = setup_app();
        app.create_folder("Work").unwrap();
        let folder_id = app.store().cache().folders()[0].id;
        app.create_note(title, folder_id).unwrap();
        let note_id = app.store().cache().notes_in(folder_id)[0].id;
        (dir, app, folder_id, note_id)
    }

    #[test]
    fn test_create_note_expands_owning_folder() {
        let (_dir, mut app) = setup_app();
        app.create_folder("Work").unwrap();
        let folder_id = app.store().cache().folders()[0].id;
        assert!(!app.is_expanded(folder_id));

        app.create_note("Todo", folder_id).unwrap();
        assert!(app.is_expanded(folder_id));
    }

    #[test]
    fn test_select_and_edit_lifecycle() {
        let (_dir, mut app, _folder_id, note_id) = setup_with_note("Todo");

        app.select_note(note_id);
        assert_eq!(app.active_note, Some(note_id));
        assert_eq!(app.edit_buffer, "# Todo\n\nStart writing here...");
        assert!(!app.is_edited);

        app.edit("# Todo\n\nChanged".to_string());
        assert!(app.is_edited);

        app.save_active().unwrap();
        assert!(!app.is_edited);
        assert_eq!(
            app.store().cache().find_note(note_id).unwrap().content,
            "# Todo\n\nChanged"
        );
    }

    #[test]
    fn test_save_without_edits_is_noop() {
        let (_dir, mut app, _folder_id, note_id) = setup_with_note("Todo");

        app.select_note(note_id);
        // No edit happened, so nothing is written
        app.save_active().unwrap();
        assert!(!app.is_edited);
    }

    #[test]
    fn test_delete_active_note_clears_selection() {
        let (_dir, mut app, folder_id, note_id) = setup_with_note("Todo");

        app.select_note(note_id);
        app.edit("unsaved".to_string());

        let ran = app.delete_note(note_id, folder_id, &Always(true)).unwrap();
        assert!(ran);
        assert_eq!(app.active_note, None);
        assert!(!app.is_edited);
        assert!(app.edit_buffer.is_empty());
    }

    #[test]
    fn test_delete_note_declined_changes_nothing() {
        let (_dir, mut app, folder_id, note_id) = setup_with_note("Todo");

        app.select_note(note_id);
        let ran = app.delete_note(note_id, folder_id, &Always(false)).unwrap();
        assert!(!ran);
        assert_eq!(app.active_note, Some(note_id));
        assert_eq!(app.store().cache().notes_in(folder_id).len(), 1);
    }

    #[test]
    fn test_delete_folder_clears_dependent_state() {
        let (_dir, mut app, folder_id, note_id) = setup_with_note("Todo");

        app.select_note(note_id);
        app.open_menu_for(MenuTarget::Note(note_id));

        let ran = app.delete_folder(folder_id, &Always(true)).unwrap();
        assert!(ran);
        assert_eq!(app.active_note, None);
        assert_eq!(app.open_menu, None);
        assert!(!app.expanded.contains_key(&folder_id));
        assert!(app.store().cache().is_empty());
    }

    #[test]
    fn test_delete_folder_declined_is_noop() {
        let (_dir, mut app, folder_id, note_id) = setup_with_note("Todo");

        app.select_note(note_id);
        let ran = app.delete_folder(folder_id, &Always(false)).unwrap();
        assert!(!ran);
        assert_eq!(app.active_note, Some(note_id));
        assert_eq!(app.store().cache().folders().len(), 1);
    }

    #[test]
    fn test_menu_on_folder_closes_when_folder_deleted() {
        let (_dir, mut app, folder_id, _note_id) = setup_with_note("Todo");

        app.open_menu_for(MenuTarget::Folder(folder_id));
        app.delete_folder(folder_id, &Always(true)).unwrap();
        assert_eq!(app.open_menu, None);
    }

    #[test]
    fn test_menu_on_unrelated_folder_survives_delete() {
        let (_dir, mut app, folder_id, _note_id) = setup_with_note("Todo");
        app.create_folder("Home").unwrap();
        let other_id = app.store().cache().folders()[1].id;

        // Only menus anchored to the deleted folder or its notes close
        app.open_menu_for(MenuTarget::Folder(other_id));
        app.delete_folder(folder_id, &Always(true)).unwrap();
        assert_eq!(app.open_menu, Some(MenuTarget::Folder(other_id)));
    }

    #[test]
    fn test_reload_drops_dangling_state() {
        let (_dir, mut app, folder_id, note_id) = setup_with_note("Todo");

        app.select_note(note_id);

        // Reload keeps state that still refers to live entities
        app.reload().unwrap();
        assert_eq!(app.active_note, Some(note_id));
        assert!(app.is_expanded(folder_id));

        // A stale expansion entry does not survive a reload
        app.expanded.insert(999, true);
        app.reload().unwrap();
        assert!(!app.expanded.contains_key(&999));
    }

    #[test]
    fn test_toggle_expanded() {
        let (_dir, mut app, folder_id, _note_id) = setup_with_note("Todo");

        // create_note expanded the folder already
        assert!(app.is_expanded(folder_id));
        app.toggle_expanded(folder_id);
        assert!(!app.is_expanded(folder_id));
    }
}
