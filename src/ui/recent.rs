//! Recent-sites pane rendering.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use sitescope_types::RecentSite;

use crate::app::{App, Focus};
use crate::data::duration::format_millis;
use crate::data::timestamp::format_timestamp;

/// Placeholder for values a recent site does not carry.
pub const MISSING: &str = "—";

/// Status code column text.
pub fn format_status(site: &RecentSite) -> String {
    site.last_status_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Load time column text, in whole milliseconds.
pub fn format_load(site: &RecentSite) -> String {
    site.last_load_time_ms
        .map(format_millis)
        .unwrap_or_else(|| MISSING.to_string())
}

/// Render the recent-sites table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let recent = app.dashboard().recent();
    let focused = app.focus == Focus::Recent;

    let position_info = if !recent.is_empty() {
        format!(" [{}/{}]", recent.cursor() + 1, recent.len())
    } else {
        String::new()
    };
    let title = format!(" Recent Sites{} ", position_info);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.pane_border(focused));

    if recent.is_empty() {
        let paragraph = Paragraph::new("No sites analyzed yet")
            .style(app.theme.muted)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec!["URL", "Status", "Load", "Analyzed"])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = recent
        .sites()
        .iter()
        .map(|site| {
            let status_style = match site.last_status_code {
                Some(code) => app.theme.status_code_style(code),
                None => app.theme.muted,
            };
            Row::new(vec![
                Cell::from(site.url.clone()),
                Cell::from(format_status(site)).style(status_style),
                Cell::from(format_load(site)),
                Cell::from(format_timestamp(&site.last_analyzed_at)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),    // URL
        Constraint::Length(6),  // Status
        Constraint::Length(8),  // Load
        Constraint::Length(19), // Analyzed
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(if focused {
            app.theme.selected
        } else {
            Style::default()
        })
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(recent.cursor()));

    frame.render_stateful_widget(table, area, &mut state);
}
