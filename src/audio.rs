//! Audio output: the playback engine capability set and its rodio backend.
//!
//! The rest of the crate only talks to the [`PlaybackEngine`] trait;
//! `RodioEngine` is the one implementation that actually produces sound.

mod engine;
mod sink;

pub use engine::*;
