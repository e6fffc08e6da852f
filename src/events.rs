use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus};

/// File written by the export shortcut.
pub const EXPORT_PATH: &str = "analysis_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::Recent => handle_recent_key(app, key),
    }
}

/// Handle key input while the URL field has focus
fn handle_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input(),

        // Leave the field so single-key shortcuts work
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => app.focus_recent(),

        // Traceroute without leaving the field
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.run_traceroute();
        }

        // Clear the field
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_clear();
        }

        KeyCode::Backspace => app.input_pop(),

        // Other Ctrl/Alt chords are not text
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.input_push(c)
        }

        _ => {}
    }
}

/// Handle key input while the recent list has focus
fn handle_recent_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Back to the URL field
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Char('/') | KeyCode::Char('i') => app.focus_input(),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Re-run the selected site
        KeyCode::Enter => app.select_recent(),

        // Re-run the URL in the field
        KeyCode::Char('r') => app.submit_input(),

        KeyCode::Char('t') => app.run_traceroute(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from(EXPORT_PATH);
            match app.export_analysis(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}
