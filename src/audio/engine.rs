use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use thiserror::Error;

use super::sink::create_sink;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no usable audio output: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("cannot open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Capability set the playback session relies on.
///
/// `load` prepares a file for playback but leaves it paused; `play` starts
/// the loaded file. `is_busy` and `position` are read-only signals used for
/// advisory status display and never change what is loaded.
pub trait PlaybackEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn unpause(&mut self);
    fn stop(&mut self);
    fn is_busy(&self) -> bool;
    fn position(&self) -> Option<Duration>;
}

/// rodio-backed engine: one output stream, at most one sink at a time.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
}

impl RodioEngine {
    pub fn new() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self { stream, sink: None })
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        let new_sink = create_sink(&self.stream, path)?;
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.sink = Some(new_sink);
        Ok(())
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn unpause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_busy(&self) -> bool {
        self.sink
            .as_ref()
            .map(|s| !s.empty() && !s.is_paused())
            .unwrap_or(false)
    }

    fn position(&self) -> Option<Duration> {
        self.sink.as_ref().map(|s| s.get_pos())
    }
}
