use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Syntax-highlighting themes the preview understands.
pub const THEMES: &[&str] = &[
    "nord",
    "atomDark",
    "darcula",
    "ghcolors",
    "gruvboxDark",
    "materialDark",
    "materialLight",
    "solarizedlight",
    "tomorrow",
    "vs",
    "vscDarkPlus",
];

const DEFAULT_THEME: &str = "nord";
const DEFAULT_LANGUAGE: &str = "en";

/// User preferences persisted between sessions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub theme: String,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Load settings from a JSON file. A missing or unreadable file yields the
/// defaults; an unknown theme name falls back to the default theme.
pub fn load_settings(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Settings::default(),
    };

    let mut settings: Settings = match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(_) => return Settings::default(),
    };

    if !THEMES.contains(&settings.theme.as_str()) {
        settings.theme = DEFAULT_THEME.to_string();
    }

    settings
}

/// Persist settings as pretty-printed JSON.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_settings(&dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings {
            theme: "darcula".to_string(),
            language: "de".to_string(),
        };
        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path), settings);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"theme": "no-such-theme", "language": "en"}"#).unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings.theme, "nord");
        assert_eq!(settings.language, "en");
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();

        assert_eq!(load_settings(&path), Settings::default());
    }
}
