use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named container of notes. Rows are created by the store, which assigns
/// the id; folder names are unique across the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    pub date_created: DateTime<Utc>,
}
