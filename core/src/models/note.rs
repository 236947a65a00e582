use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label shown for a note with no usable title or content.
pub const UNTITLED_LABEL: &str = "Untitled Note";

/// A markdown document owned by exactly one folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date_created: DateTime<Utc>,
    pub folder_id: i64,
}

impl Note {
    /// Placeholder body for a freshly created note
    pub fn default_content(title: &str) -> String {
        format!("# {}\n\nStart writing here...", title)
    }

    /// Display label: the stored title when present, otherwise the first
    /// non-empty line of content, otherwise a constant placeholder.
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if !title.is_empty() {
            return title;
        }
        self.content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or(UNTITLED_LABEL)
    }
}
