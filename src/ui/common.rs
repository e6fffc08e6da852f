//! Common UI components shared across panes.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::health::HealthSignal;

/// Label shown next to the health indicator.
pub fn health_label(signal: &HealthSignal) -> &'static str {
    if signal.is_checking() {
        "checking"
    } else if signal.is_online {
        "online"
    } else {
        "offline"
    }
}

/// Render the header bar with service health.
///
/// Displays: status indicator, backend, last poll time, and the last health
/// error if any.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let signal = app.health_signal();
    let style = app.theme.health_style(&signal);

    let mut spans = vec![
        Span::styled(" ● ", style),
        Span::styled("sitescope ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(health_label(&signal), style),
        Span::raw(" │ "),
        Span::raw(app.backend_description().to_string()),
    ];

    if let Some(checked_at) = signal.checked_at {
        spans.push(Span::raw(format!(" │ checked {}", checked_at.format("%H:%M:%S"))));
    }

    if let Some(ref err) = signal.last_error {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            err.clone(),
            Style::default().fg(app.theme.critical),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows: focused pane, in-flight activity, available controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let dashboard = app.dashboard();
    let activity = if dashboard.analysis().is_loading() {
        "Analyzing..."
    } else if dashboard.traceroute().is_loading() {
        "Tracing route..."
    } else {
        "Idle"
    };

    // Context-sensitive controls
    let controls = match app.focus {
        Focus::Input => "Enter:analyze Ctrl+T:traceroute Ctrl+U:clear Tab/Esc:recent Ctrl+C:quit",
        Focus::Recent => "↑↓:select Enter:re-run t:traceroute e:export Tab:URL ?:help q:quit",
    };

    let status = format!(" {} | {} | {}", app.focus.label(), activity, controls);
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the dashboard.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " URL field",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Enter       Analyze URL"),
        Line::from("  Ctrl+T      Run traceroute"),
        Line::from("  Ctrl+U      Clear field"),
        Line::from("  Tab/Esc     Go to recent sites"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Recent sites",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Re-run selected site"),
        Line::from("  r           Re-run URL field"),
        Line::from("  t           Run traceroute"),
        Line::from("  Tab / i     Edit URL"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  e         Export analysis to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 26u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
