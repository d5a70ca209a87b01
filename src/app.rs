//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog, its view
//! projection and the presentation-owned state (selection, input mode,
//! status line).

mod model;

pub use model::*;
