use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/dacapo/config.toml` or `~/.config/dacapo/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DACAPO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library: LibrarySettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Where the persisted catalog document lives.
    ///
    /// Relative paths resolve against the working directory.
    pub catalog_path: PathBuf,

    /// File extensions accepted when adding a song (case-insensitive,
    /// without dot).
    pub extensions: Vec<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("songs.json"),
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Interval of the advisory playback-status poll (milliseconds).
    pub status_poll_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ da capo: take it from the top ~ ".to_string(),
            status_poll_ms: 1000,
        }
    }
}
