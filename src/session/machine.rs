use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::audio::{EngineError, PlaybackEngine};

/// Authoritative transport state of the playback session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransportState::Stopped => "Stopped",
            TransportState::Playing => "Playing",
            TransportState::Paused => "Paused",
        })
    }
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("'{0}' was already played this session")]
    AlreadyPlayed(String),
    #[error("playback engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Transport state machine over a playback engine.
///
/// Holds what is currently playing or paused and which songs have already
/// been started since the last Stop. `current_song` is set exactly while the
/// transport is Playing or Paused.
pub struct PlaybackSession<E> {
    engine: E,
    transport: TransportState,
    current: Option<String>,
    played: BTreeSet<String>,
}

impl<E: PlaybackEngine> PlaybackSession<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            transport: TransportState::Stopped,
            current: None,
            played: BTreeSet::new(),
        }
    }

    pub fn transport(&self) -> TransportState {
        self.transport
    }

    pub fn current_song(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether `name` has been started since the last Stop.
    pub fn already_played(&self, name: &str) -> bool {
        self.played.contains(name)
    }

    /// Start playing a resolved song.
    ///
    /// A name already played this session is refused without touching the
    /// transport. An engine failure during load falls the session back to
    /// Stopped; the song does not count as played.
    pub fn play(&mut self, name: &str, path: &Path) -> Result<(), PlaybackError> {
        if self.played.contains(name) {
            return Err(PlaybackError::AlreadyPlayed(name.to_string()));
        }

        if let Err(e) = self.engine.load(path) {
            self.engine.stop();
            self.transport = TransportState::Stopped;
            self.current = None;
            return Err(e.into());
        }

        self.engine.play();
        self.transport = TransportState::Playing;
        self.current = Some(name.to_string());
        self.played.insert(name.to_string());
        Ok(())
    }

    /// Pause playback. Only meaningful while Playing; otherwise a no-op.
    pub fn pause(&mut self) {
        if self.transport == TransportState::Playing {
            self.engine.pause();
            self.transport = TransportState::Paused;
        }
    }

    /// Resume paused playback. Only meaningful while Paused; otherwise a no-op.
    pub fn unpause(&mut self) {
        if self.transport == TransportState::Paused {
            self.engine.unpause();
            self.transport = TransportState::Playing;
        }
    }

    /// Stop playback and reset the session: clears the current song and the
    /// played set. Stop while already Stopped is a no-op, not an error.
    pub fn stop(&mut self) {
        self.engine.stop();
        self.transport = TransportState::Stopped;
        self.current = None;
        self.played.clear();
    }

    /// A song left the catalog. If it is the current one, force a Stop
    /// transition before the caller completes the delete.
    pub fn song_deleted(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) {
            self.stop();
        }
    }

    /// Reclassify the engine's busy/position signals for display: busy means
    /// playing, no position means stopped, anything else paused.
    ///
    /// Advisory UI feedback only. Never mutates the transport and may
    /// transiently disagree with it (e.g. right after a track runs out).
    pub fn observed_status(&self) -> TransportState {
        if self.engine.is_busy() {
            TransportState::Playing
        } else if self.engine.position().is_none() {
            TransportState::Stopped
        } else {
            TransportState::Paused
        }
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
