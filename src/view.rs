//! View projection: the filtered, sorted subset of catalog names on screen.

use crate::library::CatalogStore;

/// The current query and the names it selects.
///
/// `displayed` is derived state: it is rebuilt in full whenever the query or
/// the catalog changes, never patched incrementally.
pub struct ViewState {
    query: String,
    displayed: Vec<String>,
}

impl ViewState {
    pub fn new(catalog: &CatalogStore) -> Self {
        let mut view = Self {
            query: String::new(),
            displayed: Vec::new(),
        };
        view.refresh(catalog);
        view
    }

    /// Replace the query and recompute the displayed names.
    pub fn set_query(&mut self, query: impl Into<String>, catalog: &CatalogStore) {
        self.query = query.into();
        self.refresh(catalog);
    }

    /// Recompute `displayed` against the current catalog and query: names
    /// whose lowercase form contains the lowercase query, lexicographic
    /// ascending. An empty query selects the whole catalog.
    pub fn refresh(&mut self, catalog: &CatalogStore) {
        let needle = self.query.to_lowercase();
        self.displayed = catalog
            .names()
            .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
            .map(str::to_string)
            .collect();
    }

    /// Append a character to the query and refresh.
    pub fn push_char(&mut self, c: char, catalog: &CatalogStore) {
        self.query.push(c);
        self.refresh(catalog);
    }

    /// Remove the last character from the query and refresh.
    pub fn pop_char(&mut self, catalog: &CatalogStore) {
        self.query.pop();
        self.refresh(catalog);
    }

    /// Drop the query entirely and show the full catalog again.
    pub fn clear_query(&mut self, catalog: &CatalogStore) {
        self.set_query("", catalog);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }
}
