use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioEngine;
use crate::library::CatalogStore;
use crate::session::PlaybackSession;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let catalog_path = settings.library.catalog_path.clone();
    let (store, load_warning) = match CatalogStore::load(&catalog_path) {
        Ok(store) => (store, None),
        Err(e) => {
            // A broken catalog file must not prevent the app from starting;
            // the first successful mutation overwrites it.
            eprintln!("dacapo: starting with an empty catalog: {e}");
            (
                CatalogStore::empty(&catalog_path),
                Some(format!("Warning: {e}")),
            )
        }
    };

    let engine = RodioEngine::new()?;
    let mut session = PlaybackSession::new(engine);
    let mut app = App::new(store);
    if let Some(warning) = load_warning {
        app.set_status(warning);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(&mut terminal, &settings, &mut app, &mut session, &mut state)
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
