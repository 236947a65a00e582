use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Duplicate name: {0}")]
    Duplicate(String),
}

impl Error {
    /// User-correctable errors are rendered inline next to the offending
    /// input; everything else surfaces as a dismissible notification.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Duplicate(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
