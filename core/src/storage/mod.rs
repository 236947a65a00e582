mod database;
mod folder_repository;
mod note_repository;

pub use database::{Connection, Database};
pub use folder_repository::FolderRepository;
pub use note_repository::NoteRepository;
