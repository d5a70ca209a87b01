use super::*;
use crate::audio::{EngineError, PlaybackEngine};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Scriptable engine double: records every call and mimics the busy/position
/// signals of a real backend.
#[derive(Default)]
struct FakeEngine {
    calls: Vec<String>,
    loaded: Option<PathBuf>,
    busy: bool,
    fail_next_load: bool,
}

impl FakeEngine {
    fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(call)).count()
    }
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        self.calls.push(format!("load {}", path.display()));
        if self.fail_next_load {
            self.fail_next_load = false;
            return Err(EngineError::Open {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            });
        }
        self.loaded = Some(path.to_path_buf());
        self.busy = false;
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push("play".into());
        self.busy = self.loaded.is_some();
    }

    fn pause(&mut self) {
        self.calls.push("pause".into());
        self.busy = false;
    }

    fn unpause(&mut self) {
        self.calls.push("unpause".into());
        self.busy = self.loaded.is_some();
    }

    fn stop(&mut self) {
        self.calls.push("stop".into());
        self.loaded = None;
        self.busy = false;
    }

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn position(&self) -> Option<Duration> {
        self.loaded.as_ref().map(|_| Duration::from_secs(3))
    }
}

fn session() -> PlaybackSession<FakeEngine> {
    PlaybackSession::new(FakeEngine::default())
}

#[test]
fn play_starts_engine_and_marks_played() {
    let mut s = session();
    s.play("Alpha", Path::new("/music/Alpha.mp3")).unwrap();

    assert_eq!(s.transport(), TransportState::Playing);
    assert_eq!(s.current_song(), Some("Alpha"));
    assert!(s.already_played("Alpha"));
    assert_eq!(s.engine().count("load"), 1);
    assert_eq!(s.engine().count("play"), 1);
}

#[test]
fn replaying_a_name_reports_already_played_without_restarting() {
    let mut s = session();
    s.play("Alpha", Path::new("/a.mp3")).unwrap();

    let err = s.play("Alpha", Path::new("/a.mp3")).unwrap_err();
    assert!(matches!(err, PlaybackError::AlreadyPlayed(_)));

    // Transport untouched, engine not restarted.
    assert_eq!(s.transport(), TransportState::Playing);
    assert_eq!(s.current_song(), Some("Alpha"));
    assert_eq!(s.engine().count("load"), 1);
    assert_eq!(s.engine().count("play"), 1);
}

#[test]
fn stop_resets_session_and_allows_replay() {
    let mut s = session();
    s.play("Alpha", Path::new("/a.mp3")).unwrap();
    s.stop();

    assert_eq!(s.transport(), TransportState::Stopped);
    assert_eq!(s.current_song(), None);
    assert!(!s.already_played("Alpha"));

    s.play("Alpha", Path::new("/a.mp3")).unwrap();
    assert_eq!(s.transport(), TransportState::Playing);
}

#[test]
fn stop_when_already_stopped_changes_nothing() {
    let mut s = session();
    s.stop();
    assert_eq!(s.transport(), TransportState::Stopped);
    assert_eq!(s.current_song(), None);
}

#[test]
fn pause_only_applies_while_playing() {
    let mut s = session();

    s.pause();
    assert_eq!(s.transport(), TransportState::Stopped);
    assert_eq!(s.engine().count("pause"), 0);

    s.play("Alpha", Path::new("/a.mp3")).unwrap();
    s.pause();
    assert_eq!(s.transport(), TransportState::Paused);
    assert_eq!(s.engine().count("pause"), 1);

    // Pausing again stays paused without another engine call.
    s.pause();
    assert_eq!(s.transport(), TransportState::Paused);
    assert_eq!(s.engine().count("pause"), 1);
}

#[test]
fn unpause_only_applies_while_paused() {
    let mut s = session();

    s.unpause();
    assert_eq!(s.transport(), TransportState::Stopped);
    assert_eq!(s.engine().count("unpause"), 0);

    s.play("Alpha", Path::new("/a.mp3")).unwrap();
    s.pause();
    s.unpause();
    assert_eq!(s.transport(), TransportState::Playing);
    assert_eq!(s.engine().count("unpause"), 1);
}

#[test]
fn played_set_survives_pause_and_unpause() {
    let mut s = session();
    s.play("Alpha", Path::new("/a.mp3")).unwrap();
    s.pause();
    s.unpause();
    assert!(s.already_played("Alpha"));
}

#[test]
fn engine_failure_falls_back_to_stopped() {
    let mut s = session();
    s.play("Alpha", Path::new("/a.mp3")).unwrap();
    s.engine_mut().fail_next_load = true;

    let err = s.play("Beta", Path::new("/b.mp3")).unwrap_err();
    assert!(matches!(err, PlaybackError::Engine(_)));
    assert_eq!(s.transport(), TransportState::Stopped);
    assert_eq!(s.current_song(), None);

    // The failed song never started, so it is not marked played.
    assert!(!s.already_played("Beta"));
    s.play("Beta", Path::new("/b.mp3")).unwrap();
    assert_eq!(s.transport(), TransportState::Playing);
}

#[test]
fn deleting_the_current_song_forces_a_stop() {
    let mut s = session();
    s.play("Alpha", Path::new("/a.mp3")).unwrap();
    s.song_deleted("Alpha");

    assert_eq!(s.transport(), TransportState::Stopped);
    assert_eq!(s.current_song(), None);
    assert_eq!(s.engine().count("stop"), 1);
}

#[test]
fn deleting_another_song_leaves_playback_alone() {
    let mut s = session();
    s.play("Alpha", Path::new("/a.mp3")).unwrap();
    s.song_deleted("Beta");

    assert_eq!(s.transport(), TransportState::Playing);
    assert_eq!(s.current_song(), Some("Alpha"));
    assert_eq!(s.engine().count("stop"), 0);
}

#[test]
fn observed_status_reclassifies_engine_signals() {
    let mut s = session();

    // Nothing loaded: no position signal.
    assert_eq!(s.observed_status(), TransportState::Stopped);

    s.play("Alpha", Path::new("/a.mp3")).unwrap();
    assert_eq!(s.observed_status(), TransportState::Playing);

    s.pause();
    assert_eq!(s.observed_status(), TransportState::Paused);

    s.stop();
    assert_eq!(s.observed_status(), TransportState::Stopped);
}
