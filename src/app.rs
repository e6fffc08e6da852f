//! Application state and interaction logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::dashboard::Dashboard;
use crate::health::{HealthMonitor, HealthSignal};
use crate::input::validate_url;
use crate::runner::Controller;
use crate::ui::Theme;

/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Typing into the URL field.
    Input,
    /// Browsing the recent-sites list. Single-key shortcuts are active here.
    Recent,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Input => Focus::Recent,
            Focus::Recent => Focus::Input,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Focus::Input => "URL",
            Focus::Recent => "Recent",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub focus: Focus,

    // URL field
    pub input: String,
    pub input_error: Option<String>,

    controller: Controller,
    health: Option<HealthMonitor>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App around a controller and an optional health monitor.
    pub fn new(controller: Controller, health: Option<HealthMonitor>, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            focus: Focus::Input,
            input: String::new(),
            input_error: None,
            controller,
            health,
            theme,
            status_message: None,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        self.controller.dashboard()
    }

    #[cfg(test)]
    pub(crate) fn dashboard_mut(&mut self) -> &mut Dashboard {
        self.controller.dashboard_mut()
    }

    /// Returns a description of the backend.
    pub fn backend_description(&self) -> &str {
        self.controller.backend()
    }

    /// Latest health signal. Reads as "checking" when no monitor is running.
    pub fn health_signal(&self) -> HealthSignal {
        self.health
            .as_ref()
            .map(HealthMonitor::signal)
            .unwrap_or_default()
    }

    /// Issue the initial recent-sites load.
    pub fn start(&mut self) {
        self.controller.start();
    }

    /// Apply any finished requests. Returns true if something changed.
    pub fn tick(&mut self) -> bool {
        self.controller.pump() > 0
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Validate the URL field and start an analysis.
    ///
    /// Invalid input is reported next to the field and never reaches the
    /// network.
    pub fn submit_input(&mut self) {
        match validate_url(&self.input) {
            Ok(url) => {
                self.input_error = None;
                self.input = url.clone();
                self.controller.run_analysis(url);
            }
            Err(err) => self.input_error = Some(err.to_string()),
        }
    }

    /// Start a traceroute for the current target.
    ///
    /// Ignored while an analysis is running, since the target may be about
    /// to change.
    pub fn run_traceroute(&mut self) {
        if self.dashboard().analysis().is_loading() {
            self.set_status_message("Wait for the analysis to finish".to_string());
            return;
        }
        if self.dashboard().traceroute().is_loading() {
            return;
        }
        self.controller.run_traceroute();
    }

    /// Re-analyze the recent site under the cursor.
    pub fn select_recent(&mut self) {
        let Some(url) = self.dashboard().recent().selected_url().map(str::to_string) else {
            return;
        };
        self.input = url.clone();
        self.input_error = None;
        self.controller.select_recent(&url);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    pub fn focus_recent(&mut self) {
        self.focus = Focus::Recent;
    }

    /// Append a character to the URL field.
    pub fn input_push(&mut self, c: char) {
        self.input.push(c);
        self.input_error = None;
    }

    /// Remove the last character from the URL field.
    pub fn input_pop(&mut self) {
        self.input.pop();
    }

    pub fn input_clear(&mut self) {
        self.input.clear();
        self.input_error = None;
    }

    pub fn select_next(&mut self) {
        self.controller.dashboard_mut().recent_mut().select_next();
    }

    pub fn select_prev(&mut self) {
        self.controller.dashboard_mut().recent_mut().select_prev();
    }

    pub fn select_first(&mut self) {
        self.controller.dashboard_mut().recent_mut().select_first();
    }

    pub fn select_last(&mut self) {
        self.controller.dashboard_mut().recent_mut().select_last();
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit and stop health polling.
    pub fn quit(&mut self) {
        self.running = false;
        if let Some(ref mut health) = self.health {
            health.stop();
        }
    }

    /// Export the analysis on display to a JSON file.
    pub fn export_analysis(&self, path: &Path) -> Result<()> {
        let Some(analysis) = self.dashboard().analysis().current() else {
            anyhow::bail!("No analysis to export");
        };

        let json = serde_json::to_string_pretty(analysis)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
