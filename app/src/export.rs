use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Text,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "md" => Some(ExportFormat::Markdown),
            "txt" => Some(ExportFormat::Text),
            _ => None,
        }
    }
}

/// Write note content to `path`, appending the format's extension when the
/// chosen path has none. Empty notes are rejected; the shell must not offer
/// export for them. Returns the path actually written.
pub fn export_note(path: &Path, content: &str, format: ExportFormat) -> Result<PathBuf> {
    if content.trim().is_empty() {
        bail!("Nothing to export: the note is empty");
    }

    let mut path = path.to_path_buf();
    if path.extension().is_none() {
        path.set_extension(format.extension());
    }

    fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
