//! Event Loop - TUI entry point and event handling

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lcsh_common::HeadingError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;

use super::render::draw_ui;
use super::state::{Focus, TuiState};
use crate::clipboard;

/// Messages delivered back into the event loop from spawned work.
#[derive(Debug)]
pub enum TuiMessage {
    /// One extraction round trip resolved. Overlapping requests are not
    /// serialized; whichever result arrives last is the one displayed.
    Headings(Result<Vec<String>, HeadingError>),
}

/// Run the TUI.
pub async fn run() -> Result<()> {
    enable_raw_mode().map_err(|e| {
        anyhow::anyhow!(
            "Failed to enable raw mode: {}. Ensure you're running in a real terminal (TTY).",
            e
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode();
        anyhow::anyhow!("Failed to initialize terminal: {}", e)
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = TuiState::load();

    let (tx, mut rx) = mpsc::channel(32);

    let result = run_event_loop(&mut terminal, &mut state, tx, &mut rx).await;

    let cleanup_result = restore_terminal(&mut terminal);

    result.and(cleanup_result)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main event loop
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut TuiState,
    tx: mpsc::Sender<TuiMessage>,
    rx: &mut mpsc::Receiver<TuiMessage>,
) -> Result<()> {
    loop {
        // Advance the spinner while a request is in flight
        if state.session.is_loading() {
            state.spinner_frame = (state.spinner_frame + 1) % 8;
        }

        // Apply results from spawned extraction tasks
        while let Ok(msg) = rx.try_recv() {
            match msg {
                TuiMessage::Headings(result) => {
                    state.session.apply_result(result);
                    state.clamp_selection();
                }
            }
        }

        terminal.draw(|f| draw_ui(f, state))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match (key.code, key.modifiers) {
                    // Ctrl+C - exit
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                        break;
                    }
                    // Ctrl+G - generate headings
                    (KeyCode::Char('g'), KeyModifiers::CONTROL) => {
                        handle_generate(state, tx.clone());
                    }
                    // Ctrl+D - toggle dark mode
                    (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                        state.session.toggle_dark_mode();
                    }
                    // Ctrl+K - reveal/mask the API key
                    (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                        state.session.toggle_reveal_key();
                    }
                    // Ctrl+U - clear the focused field
                    (KeyCode::Char('u'), KeyModifiers::CONTROL) => match state.focus {
                        Focus::Text => {
                            state.text.clear();
                            state.sync_text();
                        }
                        Focus::ApiKey => {
                            state.key.clear();
                            state.sync_key();
                        }
                        Focus::Headings => {}
                    },
                    // F1 - toggle help
                    (KeyCode::F(1), _) => {
                        state.show_help = !state.show_help;
                    }
                    // Tab - cycle focus
                    (KeyCode::Tab, _) => {
                        state.focus = state.focus.next();
                    }
                    // Esc - dismiss help
                    (KeyCode::Esc, _) => {
                        state.show_help = false;
                    }
                    _ => handle_field_key(state, key.code, key.modifiers),
                }
            }
        }
    }

    Ok(())
}

/// Validate and fire one extraction round trip.
///
/// Ignored while a request is already loading (the page's disabled
/// button); a request that slips past resolves last-wins.
fn handle_generate(state: &mut TuiState, tx: mpsc::Sender<TuiMessage>) {
    if state.session.is_loading() {
        return;
    }

    if state.session.begin_request().is_err() {
        // Validation failure already populated the session error.
        return;
    }

    let client = state.client.clone();
    let text = state.session.raw_text().to_string();
    let api_key = state.session.api_key().to_string();

    tokio::spawn(async move {
        let result = client.extract_headings(&text, &api_key).await;
        let _ = tx.send(TuiMessage::Headings(result)).await;
    });
}

/// Keys routed to whichever field has focus. Cursor movement and edits
/// go through the char-indexed buffers; byte offsets never leak in here.
fn handle_field_key(state: &mut TuiState, code: KeyCode, modifiers: KeyModifiers) {
    match state.focus {
        Focus::Text => match (code, modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                state.text.insert(c);
                state.sync_text();
            }
            (KeyCode::Enter, _) => {
                state.text.insert('\n');
                state.sync_text();
            }
            (KeyCode::Backspace, _) => {
                if state.text.backspace() {
                    state.sync_text();
                }
            }
            (KeyCode::Left, _) => {
                state.text.left();
            }
            (KeyCode::Right, _) => {
                state.text.right();
            }
            _ => {}
        },
        Focus::ApiKey => match (code, modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                state.key.insert(c);
                state.sync_key();
            }
            (KeyCode::Backspace, _) => {
                if state.key.backspace() {
                    state.sync_key();
                }
            }
            (KeyCode::Left, _) => {
                state.key.left();
            }
            (KeyCode::Right, _) => {
                state.key.right();
            }
            _ => {}
        },
        Focus::Headings => match (code, modifiers) {
            (KeyCode::Up, _) => {
                state.selected = state.selected.saturating_sub(1);
            }
            (KeyCode::Down, _) => {
                if state.selected + 1 < state.session.headings().len() {
                    state.selected += 1;
                }
            }
            (KeyCode::Enter, _) | (KeyCode::Char('c'), KeyModifiers::NONE) => {
                let selected = state.selected;
                let heading = state.session.headings().get(selected).cloned();
                if let Some(heading) = heading {
                    // Best-effort copy; the indicator lights only on success
                    if clipboard::copy_text(&heading) {
                        state.session.mark_copied(selected);
                    }
                }
            }
            _ => {}
        },
    }
}
