use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("'{0}' is already in the catalog")]
    DuplicateName(String),
    #[error("'{0}' is not in the catalog")]
    NotFound(String),
    #[error("catalog file is corrupt: {0}")]
    CorruptStorage(#[from] serde_json::Error),
    #[error("catalog storage error: {0}")]
    Storage(#[from] io::Error),
}

/// Durable song catalog: a `name -> path` mapping backed by a JSON document.
///
/// The document's top-level shape is the mapping itself, e.g.
/// `{ "Song A": "/music/Song A.mp3" }`. Names are case-sensitive and unique;
/// iteration order is lexicographic ascending.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    songs: BTreeMap<String, PathBuf>,
}

impl CatalogStore {
    /// Open the catalog persisted at `path`.
    ///
    /// A missing file is a valid initial state and yields an empty catalog;
    /// an unreadable or unparseable file is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                songs: BTreeMap::new(),
            });
        }

        let data = fs::read_to_string(&path)?;
        let songs: BTreeMap<String, PathBuf> = serde_json::from_str(&data)?;
        Ok(Self { path, songs })
    }

    /// An empty catalog that will persist to `path` on the first mutation.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            songs: BTreeMap::new(),
        }
    }

    /// Insert a song. Existing names are never overwritten.
    pub fn add(&mut self, name: &str, song_path: impl Into<PathBuf>) -> Result<(), CatalogError> {
        if self.songs.contains_key(name) {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }

        self.songs.insert(name.to_string(), song_path.into());
        if let Err(e) = self.save() {
            // Keep memory in step with the last durable state.
            self.songs.remove(name);
            return Err(e);
        }
        Ok(())
    }

    /// Remove a song by name.
    pub fn delete(&mut self, name: &str) -> Result<(), CatalogError> {
        let Some(removed) = self.songs.remove(name) else {
            return Err(CatalogError::NotFound(name.to_string()));
        };

        if let Err(e) = self.save() {
            self.songs.insert(name.to_string(), removed);
            return Err(e);
        }
        Ok(())
    }

    /// Look up the file location for `name`.
    pub fn resolve(&self, name: &str) -> Result<&Path, CatalogError> {
        self.songs
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.songs.contains_key(name)
    }

    /// All song names, lexicographic ascending.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.songs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Writes go to a sibling temp file that is renamed over the target, so a
    // failed write leaves the previous document untouched.
    fn save(&self) -> Result<(), CatalogError> {
        let json = serde_json::to_string_pretty(&self.songs)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Derive the catalog name for a file: its base name with the extension
/// stripped, the same way the file chooser hands songs to the catalog.
pub fn song_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .filter(|s| !s.is_empty())
}
