pub mod cache;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use cache::TreeCache;
pub use error::{Error, Result};
pub use store::{NoteStore, StoreEvent};
