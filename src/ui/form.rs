//! URL input field.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus};

/// Render the URL field and, below it, the validation message if any.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(area);
    let focused = app.focus == Focus::Input;

    let title = if app.dashboard().analysis().is_loading() {
        " URL (analyzing...) "
    } else {
        " URL "
    };

    let mut spans = vec![Span::raw(app.input.clone())];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(app.theme.highlight)));
    } else if app.input.is_empty() {
        spans.push(Span::styled("https://example.com", app.theme.muted));
    }

    let field = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(app.theme.pane_border(focused)),
    );
    frame.render_widget(field, chunks[0]);

    if let Some(ref err) = app.input_error {
        let message = Paragraph::new(format!(" {}", err))
            .style(Style::default().fg(app.theme.critical));
        frame.render_widget(message, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use crate::api::fake::ScriptedApi;
    use crate::ui::test_support::{app, draw};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_validation_message_is_shown() {
        let api = Arc::new(ScriptedApi::new());
        let mut app = app(&api);
        app.input = "example.com".to_string();
        app.submit_input();

        let screen = draw(&app);
        assert!(screen.contains("URL must start with http:// or https://"));
    }
}
