//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, InputMode};
use crate::config::UiSettings;
use crate::session::TransportState;

/// Render the controls help text for the active input mode.
fn controls_text(mode: InputMode) -> String {
    match mode {
        InputMode::Browse => "[j/k] up/down | [enter] play | [p] pause | [u] unpause | \
             [s] stop | [a] add song | [d] delete song | [/] search | [K] metadata | [q] quit"
            .to_string(),
        InputMode::Filter => {
            "type to filter | [backspace] erase | [esc] clear search | [enter] keep search"
                .to_string()
        }
        InputMode::AddPath => "type a file path | [enter] add song | [esc] cancel".to_string(),
    }
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the entire UI into the provided `frame`.
///
/// `transport` and `current_song` come from the playback session; the rest
/// of the screen is driven by `app`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    transport: TransportState,
    current_song: Option<&str>,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" dacapo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Search / add-path input line
    let (input_title, input_text) = match app.mode {
        InputMode::AddPath => (" add song (file path) ", app.add_input.as_str()),
        _ => (" search ", app.view.query()),
    };
    let input = Paragraph::new(input_text).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(input_title),
    );
    frame.render_widget(input, chunks[1]);

    // Song list; the currently playing song keeps a distinct style until Stop.
    let items: Vec<ListItem> = app
        .view
        .displayed()
        .iter()
        .map(|name| {
            let item = ListItem::new(name.as_str());
            if current_song == Some(name.as_str()) {
                item.style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" songs "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if !app.view.displayed().is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, chunks[2], &mut state);

    // Metadata popup (keeps the list visible under it)
    if let Some(popup) = &app.metadata {
        let popup_area = centered_rect_sized(72, 9, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let body = match &popup.meta {
            Some(meta) => format!(
                "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nPath: {}",
                meta.title.as_deref().unwrap_or(&popup.name),
                meta.artist.as_deref().unwrap_or("-"),
                meta.album.as_deref().unwrap_or("-"),
                format_mmss(meta.duration),
                popup.path.display()
            ),
            None => format!(
                "Title: {}\nPath: {}\n(no readable tags)",
                popup.name,
                popup.path.display()
            ),
        };
        let meta_paragraph = Paragraph::new(body)
            .block(
                Block::default()
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    })
                    .borders(Borders::ALL)
                    .title(" metadata (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();
        parts.push(format!("Status: {}", app.status));
        if let Some(song) = current_song {
            parts.push(format!("Song: {song}"));
        }
        parts.push(format!("Transport: {transport}"));
        if app.store.is_empty() {
            parts.push("Catalog empty, [a] adds a song".to_string());
        } else {
            parts.push(format!("{} songs", app.store.len()));
        }
        parts.push(format!("Catalog: {}", app.store.path().display()));
        parts.join(" • ")
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[3]);

    let footer = Paragraph::new(controls_text(app.mode))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
