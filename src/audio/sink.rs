//! Utility for creating `rodio` sinks from file paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` on the shared output stream.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use super::engine::EngineError;

/// Create a paused `Sink` that will play the file at `path` from the start.
pub(super) fn create_sink(handle: &OutputStream, path: &Path) -> Result<Sink, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|source| EngineError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
