//! Traceroute pane rendering.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};
use sitescope_types::TracerouteResult;

use crate::app::App;

/// Shown when the service returned no parseable hops.
pub const NO_HOPS: &str = "No hop data parsed. See raw output for details.";

/// Heading of the raw output section under the hop table.
pub const RAW_OUTPUT: &str = "Raw output";

/// Render the traceroute pane.
///
/// An error is drawn as a banner on top; whatever result the pane still
/// holds stays visible below it.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let vm = app.dashboard().traceroute();

    let title = match vm.result() {
        Some(result) if !vm.is_loading() => format!(" Traceroute: {} ", result.target),
        _ if vm.is_loading() => " Traceroute (running...) ".to_string(),
        _ => " Traceroute ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let error_height = if vm.error_message().is_some() { 2 } else { 0 };
    let [error_area, body] =
        Layout::vertical([Constraint::Length(error_height), Constraint::Min(0)]).areas(inner);

    if let Some(err) = vm.error_message() {
        let paragraph = Paragraph::new(format!("Error: {}", err))
            .style(Style::default().fg(app.theme.critical))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, error_area);
    }

    match vm.result() {
        Some(result) if result.is_empty() => render_no_hops(frame, result, body),
        Some(result) => render_hops(frame, app, result, body),
        None if vm.error_message().is_some() && !vm.is_loading() => {}
        None => {
            let hint = if vm.is_loading() {
                "Tracing route..."
            } else {
                "Press t to trace the route to the analyzed site."
            };
            let paragraph = Paragraph::new(hint)
                .style(app.theme.muted)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, body);
        }
    }
}

fn render_no_hops(frame: &mut Frame, result: &TracerouteResult, area: Rect) {
    let mut lines = vec![Line::from(NO_HOPS), Line::default()];
    lines.extend(result.raw_output.lines().map(|line| Line::from(line.to_string())));
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_hops(frame: &mut Frame, app: &App, result: &TracerouteResult, area: Rect) {
    // Hop table first; raw output gets what is left, at most half the pane
    let raw_lines = result.raw_output.lines().count() as u16;
    let raw_height = if raw_lines == 0 {
        0
    } else {
        (raw_lines + 2).min(area.height / 2)
    };
    let [table_area, raw_area] =
        Layout::vertical([Constraint::Min(2), Constraint::Length(raw_height)]).areas(area);

    let header = Row::new(vec!["Hop", "Details"])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = result
        .hops
        .iter()
        .map(|hop| Row::new(vec![hop.hop.to_string(), hop.details.clone()]))
        .collect();

    let widths = [Constraint::Length(4), Constraint::Fill(1)];
    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, table_area);

    if raw_height > 0 {
        let mut lines = vec![Line::default(), Line::styled(RAW_OUTPUT, app.theme.header)];
        lines.extend(
            result
                .raw_output
                .lines()
                .map(|line| Line::styled(line.to_string(), app.theme.muted)),
        );
        frame.render_widget(Paragraph::new(lines), raw_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{analysis, server_error, ScriptedApi};
    use crate::api::RequestError;
    use crate::ui::test_support::{app, draw};
    use crate::view::{Completion, Effect};
    use sitescope_types::TracerouteHop;
    use std::sync::Arc;

    fn analyzed(app: &mut App) {
        let dashboard = app.dashboard_mut();
        let Effect::Analyze { id, .. } = dashboard.run_analysis("https://a.com") else {
            panic!("expected analyze effect");
        };
        dashboard.apply(Completion::Analyzed {
            id,
            result: Ok(analysis("https://a.com", 10.0)),
        });
    }

    fn trace_again(app: &mut App, result: Result<TracerouteResult, RequestError>) {
        let dashboard = app.dashboard_mut();
        let Some(Effect::Traceroute { id, .. }) = dashboard.run_traceroute() else {
            panic!("expected traceroute effect");
        };
        dashboard.apply(Completion::Traced { id, result });
    }

    fn traced(app: &mut App, result: TracerouteResult) {
        analyzed(app);
        trace_again(app, Ok(result));
    }

    #[tokio::test]
    async fn test_empty_hops_shows_hint_and_raw_output() {
        let api = Arc::new(ScriptedApi::new());
        let mut app = app(&api);
        traced(
            &mut app,
            TracerouteResult {
                target: "https://a.com".to_string(),
                hops: Vec::new(),
                raw_output: "traceroute: unknown host".to_string(),
            },
        );

        let screen = draw(&app);
        assert!(screen.contains("No hop data parsed."));
        assert!(screen.contains("traceroute: unknown host"));
    }

    #[tokio::test]
    async fn test_hops_are_listed() {
        let api = Arc::new(ScriptedApi::new());
        let mut app = app(&api);
        traced(&mut app, crate::api::fake::trace("https://a.com"));

        let screen = draw(&app);
        assert!(screen.contains("10.0.0.1 2ms"));
    }

    #[tokio::test]
    async fn test_raw_output_follows_hop_table() {
        let api = Arc::new(ScriptedApi::new());
        let mut app = app(&api);
        traced(
            &mut app,
            TracerouteResult {
                target: "https://a.com".to_string(),
                hops: vec![TracerouteHop::new(1, "10.0.0.1 2ms")],
                raw_output: "traceroute to a.com, 30 hops max\n 1  10.0.0.1  2ms".to_string(),
            },
        );

        let screen = draw(&app);
        assert!(screen.contains(RAW_OUTPUT));
        assert!(screen.contains("traceroute to a.com, 30 hops max"));
    }

    #[tokio::test]
    async fn test_error_keeps_previous_hops_visible() {
        let api = Arc::new(ScriptedApi::new());
        let mut app = app(&api);
        traced(&mut app, crate::api::fake::trace("https://a.com"));
        trace_again(&mut app, Err(server_error(504, "Traceroute timed out")));

        assert!(app.dashboard().traceroute().result().is_some());
        let screen = draw(&app);
        assert!(screen.contains("Error: Traceroute timed out"));
        assert!(screen.contains("10.0.0.1 2ms"));
    }

    #[tokio::test]
    async fn test_error_without_result_shows_only_banner() {
        let api = Arc::new(ScriptedApi::new());
        let mut app = app(&api);
        analyzed(&mut app);
        trace_again(&mut app, Err(server_error(504, "Traceroute timed out")));

        let screen = draw(&app);
        assert!(screen.contains("Error: Traceroute timed out"));
        assert!(!screen.contains("Press t to trace"));
    }
}
