use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::audio::PlaybackEngine;
use crate::config;
use crate::session::{PlaybackError, PlaybackSession, TransportState};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// When the advisory status poll last ran.
    last_poll: Instant,
    /// Last classification the poll produced; the status line is only
    /// rewritten when it changes, so other messages stay readable.
    last_observed: Option<TransportState>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            last_poll: Instant::now(),
            last_observed: Some(TransportState::Stopped),
        }
    }
}

/// Main terminal event loop: input handling, UI drawing and the advisory
/// playback-status poll, all serialized on this thread. Returns `Ok(())`
/// when shutdown is requested.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &mut PlaybackSession<E>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll_interval = Duration::from_millis(settings.ui.status_poll_ms);

    loop {
        // Reclassify the engine's busy/position signal for display. This is
        // read-only feedback; the authoritative transport state only ever
        // changes through commands.
        if state.last_poll.elapsed() >= poll_interval {
            state.last_poll = Instant::now();
            let observed = session.observed_status();
            if state.last_observed != Some(observed) {
                state.last_observed = Some(observed);
                app.set_status(observed.to_string());
            }
        }

        let transport = session.transport();
        let current = session.current_song().map(str::to_string);
        terminal.draw(|f| ui::draw(f, app, transport, current.as_deref(), &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, session) {
                    break;
                }
            }
        }
    }

    // Universal reset on the way out; releases the audio sink. The poll dies
    // with this loop, so no timer outlives the process.
    session.stop();
    Ok(())
}

/// Handle one key event. Returns `true` when the app should quit.
fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &mut PlaybackSession<E>,
) -> bool {
    match app.mode {
        InputMode::Filter => {
            match key.code {
                KeyCode::Esc => app.clear_filter(),
                KeyCode::Enter => app.exit_filter_mode(),
                KeyCode::Backspace => app.pop_filter_char(),
                KeyCode::Char(c) if !c.is_control() => app.push_filter_char(c),
                _ => {}
            }
            return false;
        }
        InputMode::AddPath => {
            match key.code {
                KeyCode::Esc => app.cancel_add(),
                KeyCode::Enter => app.commit_add(&settings.library.extensions),
                KeyCode::Backspace => {
                    app.add_input.pop();
                }
                KeyCode::Char(c) if !c.is_control() => app.add_input.push(c),
                _ => {}
            }
            return false;
        }
        InputMode::Browse => {}
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('/') => app.enter_filter_mode(),
        KeyCode::Char('a') => app.enter_add_mode(),
        KeyCode::Char('d') => delete_selected(app, session),
        KeyCode::Enter => {
            if app.has_songs() {
                play_selected(app, session);
            }
        }
        KeyCode::Char('p') => {
            session.pause();
            if session.transport() == TransportState::Paused {
                app.set_status("Paused");
            }
        }
        KeyCode::Char('u') => {
            session.unpause();
            if session.transport() == TransportState::Playing {
                app.set_status("Playing");
            }
        }
        KeyCode::Char('s') => {
            session.stop();
            app.set_status("Stopped");
        }
        KeyCode::Char('K') => app.toggle_metadata(),
        _ => {}
    }

    false
}

/// Play the song under the cursor: resolve its path through the catalog,
/// then hand name and path to the session.
fn play_selected<E: PlaybackEngine>(app: &mut App, session: &mut PlaybackSession<E>) {
    let Some(name) = app.selected_name().map(str::to_string) else {
        return;
    };

    let path = match app.store.resolve(&name) {
        Ok(p) => p.to_path_buf(),
        Err(e) => {
            app.set_status(e.to_string());
            return;
        }
    };

    if session.already_played(&name) {
        app.set_status("Already Played");
        return;
    }

    match session.play(&name, &path) {
        Ok(()) => app.set_status("Playing"),
        Err(PlaybackError::AlreadyPlayed(_)) => app.set_status("Already Played"),
        Err(e @ PlaybackError::Engine(_)) => app.set_status(e.to_string()),
    }
}

fn delete_selected<E: PlaybackEngine>(app: &mut App, session: &mut PlaybackSession<E>) {
    let Some(name) = app.selected_name().map(str::to_string) else {
        app.set_status("Song not found in library");
        return;
    };

    // Deleting the song on the transport forces a Stop transition first.
    session.song_deleted(&name);
    app.delete_song(&name);
}
