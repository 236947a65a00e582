mod folder;
mod note;

pub use folder::Folder;
pub use note::{Note, UNTITLED_LABEL};

use chrono::{DateTime, Utc};

/// Convert DateTime<Utc> to the RFC 3339 text stored in the database
pub fn datetime_to_text(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339()
}

/// Parse a stored RFC 3339 text value back into DateTime<Utc>
pub fn text_to_datetime(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
