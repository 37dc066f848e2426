//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Mode};
use crate::api::RestoreApi;

/// Poll for and handle events with a timeout.
///
/// Returns `Ok(true)` if an event was handled, `Ok(false)` if timeout expired.
pub fn handle_events<A>(app: &mut App<A>, timeout: Duration) -> std::io::Result<bool>
where
    A: RestoreApi + Send + Sync + 'static,
{
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key_event(app, key);
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Handle a single key event.
pub fn handle_key_event<A>(app: &mut App<A>, key: KeyEvent)
where
    A: RestoreApi + Send + Sync + 'static,
{
    // Global keys (work in any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Picker => handle_picker_mode(app, key),
        Mode::Browse => handle_browse_mode(app, key),
        Mode::Help => handle_help_mode(app, key),
    }
}

fn handle_picker_mode<A>(app: &mut App<A>, key: KeyEvent)
where
    A: RestoreApi + Send + Sync + 'static,
{
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Esc => {
            // Back to the open backup, if there is one
            if app.browser.tree().is_some() {
                app.mode = Mode::Browse;
            } else {
                app.should_quit = true;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection(-1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection(1);
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => {
            app.open_picked();
        }
        KeyCode::Char('r') => {
            app.refresh_backups();
        }
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
        }
        _ => {}
    }
}

fn handle_browse_mode<A>(app: &mut App<A>, key: KeyEvent)
where
    A: RestoreApi + Send + Sync + 'static,
{
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection(-1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection(1);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.select_edge(false);
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.select_edge(true);
        }
        KeyCode::PageUp => {
            app.move_selection(-20);
        }
        KeyCode::PageDown => {
            app.move_selection(20);
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => {
            app.enter_selected();
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => {
            app.go_up();
        }

        // Selection
        KeyCode::Char(' ') => {
            app.toggle_selected();
        }
        KeyCode::Char('a') => {
            app.toggle_all_visible();
        }
        KeyCode::Char('c') => {
            app.clear_selection();
        }

        // Downloads
        KeyCode::Char('d') => {
            app.download_highlighted();
        }
        KeyCode::Char('D') => {
            app.download_selection();
        }

        KeyCode::Char('b') | KeyCode::Esc => {
            app.back_to_picker();
        }
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
        }
        _ => {}
    }
}

fn handle_help_mode<A>(app: &mut App<A>, key: KeyEvent)
where
    A: RestoreApi + Send + Sync + 'static,
{
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.mode = if app.browser.tree().is_some() {
                Mode::Browse
            } else {
                Mode::Picker
            };
        }
        _ => {}
    }
}
