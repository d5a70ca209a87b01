//! Application model types: `App`, `InputMode` and the metadata popup.

use std::path::{Path, PathBuf};

use crate::library::{self, CatalogError, CatalogStore, SongMeta};
use crate::view::ViewState;

/// Which surface currently consumes keystrokes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Browse,
    /// Editing the search query.
    Filter,
    /// Typing the path of a song file to add.
    AddPath,
}

/// On-demand tag data for the metadata popup.
pub struct MetadataPopup {
    pub name: String,
    pub path: PathBuf,
    pub meta: Option<SongMeta>,
}

/// The main application model.
///
/// Owns the catalog store and the view projection; selection is an index
/// into the currently displayed names and is passed to transport commands by
/// name, never implied by a widget.
pub struct App {
    pub store: CatalogStore,
    pub view: ViewState,
    pub selected: usize,
    pub mode: InputMode,
    pub add_input: String,
    pub status: String,
    pub metadata: Option<MetadataPopup>,
}

impl App {
    pub fn new(store: CatalogStore) -> Self {
        let view = ViewState::new(&store);
        Self {
            store,
            view,
            selected: 0,
            mode: InputMode::Browse,
            add_input: String::new(),
            status: "Stopped".to_string(),
            metadata: None,
        }
    }

    /// Replace the status-line message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// The name under the cursor, if any song is displayed.
    pub fn selected_name(&self) -> Option<&str> {
        self.view.displayed().get(self.selected).map(String::as_str)
    }

    pub fn has_songs(&self) -> bool {
        !self.view.displayed().is_empty()
    }

    /// Move selection to the next displayed song, wrapping around.
    pub fn next(&mut self) {
        let len = self.view.displayed().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection to the previous displayed song, wrapping around.
    pub fn prev(&mut self) {
        let len = self.view.displayed().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Move the cursor to `name` if it is currently displayed.
    pub fn select_name(&mut self, name: &str) {
        if let Some(pos) = self.view.displayed().iter().position(|n| n == name) {
            self.selected = pos;
        }
    }

    // Keep the cursor on a real row after the displayed list shrinks.
    fn clamp_selected(&mut self) {
        let len = self.view.displayed().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Enter filter mode; the query keeps whatever was typed before.
    pub fn enter_filter_mode(&mut self) {
        self.mode = InputMode::Filter;
    }

    /// Leave filter mode, keeping the query applied.
    pub fn exit_filter_mode(&mut self) {
        self.mode = InputMode::Browse;
    }

    /// Drop the query and show the full catalog again.
    pub fn clear_filter(&mut self) {
        self.view.clear_query(&self.store);
        self.mode = InputMode::Browse;
        self.clamp_selected();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.view.push_char(c, &self.store);
        self.clamp_selected();
    }

    pub fn pop_filter_char(&mut self) {
        self.view.pop_char(&self.store);
        self.clamp_selected();
    }

    /// Enter add mode with a fresh input line.
    pub fn enter_add_mode(&mut self) {
        self.mode = InputMode::AddPath;
        self.add_input.clear();
    }

    pub fn cancel_add(&mut self) {
        self.mode = InputMode::Browse;
        self.add_input.clear();
    }

    /// Commit the add-path input: validate the extension, derive the song
    /// name from the file's base name and insert it into the catalog.
    pub fn commit_add(&mut self, extensions: &[String]) {
        let raw = self.add_input.trim().to_string();
        self.mode = InputMode::Browse;
        self.add_input.clear();
        if raw.is_empty() {
            return;
        }

        let path = PathBuf::from(&raw);
        if !has_recognized_extension(&path, extensions) {
            self.set_status(format!("Not a recognized audio file: {raw}"));
            return;
        }
        let Some(name) = library::song_name_from_path(&path) else {
            self.set_status(format!("Cannot derive a song name from '{raw}'"));
            return;
        };
        if self.store.contains(&name) {
            self.set_status("Song already exists");
            return;
        }

        match self.store.add(&name, path) {
            Ok(()) => {
                self.view.refresh(&self.store);
                self.clamp_selected();
                self.select_name(&name);
                self.set_status(format!("Added {name}"));
            }
            Err(CatalogError::DuplicateName(_)) => self.set_status("Song already exists"),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Remove `name` from the catalog and refresh the view.
    ///
    /// The caller is responsible for notifying the playback session before
    /// the delete when `name` is the current song.
    pub fn delete_song(&mut self, name: &str) {
        match self.store.delete(name) {
            Ok(()) => {
                self.view.refresh(&self.store);
                self.clamp_selected();
                self.set_status(format!("{name} deleted"));
            }
            Err(CatalogError::NotFound(_)) => self.set_status("Song not found in library"),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Open the metadata popup for the selected song, or close it.
    pub fn toggle_metadata(&mut self) {
        if self.metadata.is_some() {
            self.metadata = None;
            return;
        }

        let Some(name) = self.selected_name().map(str::to_string) else {
            return;
        };
        let Ok(path) = self.store.resolve(&name).map(Path::to_path_buf) else {
            return;
        };
        let meta = library::probe(&path);
        self.metadata = Some(MetadataPopup { name, path, meta });
    }
}

fn has_recognized_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
