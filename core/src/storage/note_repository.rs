use crate::models::{datetime_to_text, text_to_datetime, Note};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

pub struct NoteRepository;

fn map_note(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        content: row.get(2)?,
        date_created: text_to_datetime(&row.get::<_, String>(3)?),
        folder_id: row.get(4)?,
    })
}

impl NoteRepository {
    /// Insert a note row and return the stored row with its assigned id
    pub fn insert(
        conn: &Connection,
        title: &str,
        content: &str,
        folder_id: i64,
        date_created: &DateTime<Utc>,
    ) -> Result<Note> {
        conn.execute(
            "INSERT INTO notes (title, content, date_created, folder_id) VALUES (?1, ?2, ?3, ?4)",
            params![title, content, datetime_to_text(date_created), folder_id],
        )?;

        Self::get_by_id(conn, conn.last_insert_rowid())
    }

    /// Get a note by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Note> {
        let mut stmt = conn.prepare(
            "SELECT id, title, content, date_created, folder_id FROM notes WHERE id = ?1",
        )?;

        let note = stmt.query_row(params![id], map_note)?;

        Ok(note)
    }

    /// Get all notes in a folder, oldest first; the id breaks creation-time ties
    pub fn get_by_folder(conn: &Connection, folder_id: i64) -> Result<Vec<Note>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, content, date_created, folder_id FROM notes \
             WHERE folder_id = ?1 ORDER BY date_created, id",
        )?;

        let notes = stmt
            .query_map(params![folder_id], map_note)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    /// Update a note's title
    pub fn update_title(conn: &Connection, id: i64, title: &str) -> Result<()> {
        let rows_affected = conn.execute(
            "UPDATE notes SET title = ?1 WHERE id = ?2",
            params![title, id],
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound(format!("Note not found: {}", id)));
        }

        Ok(())
    }

    /// Update a note's content
    pub fn update_content(conn: &Connection, id: i64, content: &str) -> Result<()> {
        let rows_affected = conn.execute(
            "UPDATE notes SET content = ?1 WHERE id = ?2",
            params![content, id],
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound(format!("Note not found: {}", id)));
        }

        Ok(())
    }

    /// Delete a note
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        let rows_affected = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(Error::NotFound(format!("Note not found: {}", id)));
        }

        Ok(())
    }

    /// Delete all notes in a folder; returns the number of rows removed.
    /// Deleting zero notes is not an error (the folder may be empty).
    pub fn delete_by_folder(conn: &Connection, folder_id: i64) -> Result<usize> {
        let rows_affected =
            conn.execute("DELETE FROM notes WHERE folder_id = ?1", params![folder_id])?;
        Ok(rows_affected)
    }

    /// Count total notes
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Folder;
    use crate::storage::{Database, FolderRepository};
    use tempfile::tempdir;

    fn setup_test_db() -> (tempfile::TempDir, Connection, Folder) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::new(&db_path);
        let conn = db.create().unwrap();

        let folder = FolderRepository::insert(&conn, "Work", &Utc::now()).unwrap();

        (dir, conn, folder)
    }

    #[test]
    fn test_insert_note() {
        let (_dir, conn, folder) = setup_test_db();

        let note =
            NoteRepository::insert(&conn, "Todo", "# Todo\n\nbody", folder.id, &Utc::now())
                .unwrap();
        assert!(note.id > 0);
        assert_eq!(note.folder_id, folder.id);

        let retrieved = NoteRepository::get_by_id(&conn, note.id).unwrap();
        assert_eq!(retrieved, note);
    }

    #[test]
    fn test_insert_rejects_missing_folder() {
        let (_dir, conn, folder) = setup_test_db();

        let result = NoteRepository::insert(&conn, "Orphan", "body", folder.id + 99, &Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn test_get_by_folder_ordered() {
        let (_dir, conn, folder) = setup_test_db();

        let now = Utc::now();
        NoteRepository::insert(&conn, "A", "a", folder.id, &now).unwrap();
        NoteRepository::insert(&conn, "B", "b", folder.id, &now).unwrap();
        NoteRepository::insert(&conn, "C", "c", folder.id, &now).unwrap();

        let titles: Vec<String> = NoteRepository::get_by_folder(&conn, folder.id)
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_update_title_keeps_content() {
        let (_dir, conn, folder) = setup_test_db();

        let note = NoteRepository::insert(&conn, "Old", "body", folder.id, &Utc::now()).unwrap();
        NoteRepository::update_title(&conn, note.id, "New").unwrap();

        let retrieved = NoteRepository::get_by_id(&conn, note.id).unwrap();
        assert_eq!(retrieved.title, "New");
        assert_eq!(retrieved.content, "body");
    }

    #[test]
    fn test_update_content() {
        let (_dir, conn, folder) = setup_test_db();

        let note = NoteRepository::insert(&conn, "Todo", "old", folder.id, &Utc::now()).unwrap();
        NoteRepository::update_content(&conn, note.id, "new content").unwrap();

        let retrieved = NoteRepository::get_by_id(&conn, note.id).unwrap();
        assert_eq!(retrieved.content, "new content");
        assert_eq!(retrieved.title, "Todo");
    }

    #[test]
    fn test_update_missing_note() {
        let (_dir, conn, _folder) = setup_test_db();

        assert!(matches!(
            NoteRepository::update_content(&conn, 42, "x"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            NoteRepository::update_title(&conn, 42, "x"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_by_folder() {
        let (_dir, conn, folder) = setup_test_db();

        NoteRepository::insert(&conn, "A", "a", folder.id, &Utc::now()).unwrap();
        NoteRepository::insert(&conn, "B", "b", folder.id, &Utc::now()).unwrap();

        let removed = NoteRepository::delete_by_folder(&conn, folder.id).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(NoteRepository::count(&conn).unwrap(), 0);

        // Empty folder is not an error
        assert_eq!(NoteRepository::delete_by_folder(&conn, folder.id).unwrap(), 0);
    }
}
