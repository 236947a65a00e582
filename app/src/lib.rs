pub mod export;
pub mod preview;
pub mod settings;
pub mod state;

pub use export::{export_note, ExportFormat};
pub use preview::{render_markdown, render_markdown_with, Highlighter};
pub use settings::Settings;
pub use state::{App, ConfirmPrompt, MenuTarget};
