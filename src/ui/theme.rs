//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::LoadSpeed;
use crate::health::HealthSignal;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for moderate load times and degraded states.
    pub warning: Color,
    /// Color for errors, slow loads and an offline service.
    pub critical: Color,
    /// Color for fast loads and an online service.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for section headers.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Border color of the focused pane.
    pub focused: Color,
    /// Style for values that are absent ("Not set", "—").
    pub muted: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            focused: Color::Cyan,
            muted: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            focused: Color::Blue,
            muted: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a load-time bucket
    pub fn speed_style(&self, speed: LoadSpeed) -> Style {
        match speed {
            LoadSpeed::Fast => Style::default().fg(self.healthy),
            LoadSpeed::Moderate => Style::default().fg(self.warning),
            LoadSpeed::Slow => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
        }
    }

    /// Get style for the service health indicator
    pub fn health_style(&self, signal: &HealthSignal) -> Style {
        if signal.is_checking() {
            Style::default().fg(self.warning)
        } else if signal.is_online {
            Style::default().fg(self.healthy)
        } else {
            Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
        }
    }

    /// Get style for an HTTP status code
    pub fn status_code_style(&self, status_code: u16) -> Style {
        match status_code {
            200..=299 => Style::default().fg(self.healthy),
            300..=399 => Style::default().fg(self.warning),
            _ => Style::default().fg(self.critical).add_modifier(Modifier::BOLD),
        }
    }

    /// Border style of a pane, depending on focus
    pub fn pane_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focused)
        } else {
            Style::default().fg(self.border)
        }
    }
}
