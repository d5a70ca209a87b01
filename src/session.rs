//! Playback session: the transport state machine and per-session played set.
//!
//! All transport commands go through [`PlaybackSession`]; the UI only ever
//! reads the resulting state.

mod machine;

pub use machine::*;

#[cfg(test)]
mod tests;
