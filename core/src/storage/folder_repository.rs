use crate::models::{datetime_to_text, text_to_datetime, Folder};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

pub struct FolderRepository;

impl FolderRepository {
    /// Insert a folder row and return the stored row with its assigned id
    pub fn insert(conn: &Connection, name: &str, date_created: &DateTime<Utc>) -> Result<Folder> {
        conn.execute(
            "INSERT INTO folders (name, date_created) VALUES (?1, ?2)",
            params![name, datetime_to_text(date_created)],
        )?;

        Self::get_by_id(conn, conn.last_insert_rowid())
    }

    /// Get a folder by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> Result<Folder> {
        let mut stmt =
            conn.prepare("SELECT id, name, date_created FROM folders WHERE id = ?1")?;

        let folder = stmt.query_row(params![id], |row| {
            Ok(Folder {
                id: row.get(0)?,
                name: row.get(1)?,
                date_created: text_to_datetime(&row.get::<_, String>(2)?),
            })
        })?;

        Ok(folder)
    }

    /// Get a folder by exact name, if one exists
    pub fn get_by_name(conn: &Connection, name: &str) -> Result<Option<Folder>> {
        let mut stmt =
            conn.prepare("SELECT id, name, date_created FROM folders WHERE name = ?1")?;

        let folder = stmt
            .query_row(params![name], |row| {
                Ok(Folder {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    date_created: text_to_datetime(&row.get::<_, String>(2)?),
                })
            })
            .optional()?;

        Ok(folder)
    }

    /// Get all folders, oldest first; the id breaks creation-time ties
    pub fn get_all(conn: &Connection) -> Result<Vec<Folder>> {
        let mut stmt = conn
            .prepare("SELECT id, name, date_created FROM folders ORDER BY date_created, id")?;

        let folders = stmt
            .query_map([], |row| {
                Ok(Folder {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    date_created: text_to_datetime(&row.get::<_, String>(2)?),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(folders)
    }

    /// Delete a folder row. The caller must have deleted the folder's notes
    /// first; the store does not cascade.
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        let rows_affected = conn.execute("DELETE FROM folders WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(Error::NotFound(format!("Folder not found: {}", id)));
        }

        Ok(())
    }

    /// Count total folders
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM folders", [], |row| row.get(0))?;
        Ok(count)
    }
}
