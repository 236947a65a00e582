use crate::Result;
use rusqlite::Connection as SqliteConnection;
use std::path::{Path, PathBuf};

pub type Connection = SqliteConnection;

/// Opens and initializes the markpad SQLite file.
///
/// Every connection runs with foreign keys enforced, so a note row can
/// never reference a folder that is not there.
pub struct Database {
    db_path: PathBuf,
}

impl Database {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Open the existing database file.
    pub fn connect(&self) -> Result<Connection> {
        let conn = SqliteConnection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Create the database file and apply the schema. The parent directory
    /// is created on demand; the schema statements are all IF NOT EXISTS,
    /// so re-running against an initialized file is harmless.
    pub fn create(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = self.connect()?;
        conn.execute_batch(include_str!("../../schema.sql"))?;
        Ok(conn)
    }

    pub fn exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Connect, initializing the file on first run.
    pub fn get_or_create(&self) -> Result<Connection> {
        if self.exists() {
            self.connect()
        } else {
            self.create()
        }
    }
}
