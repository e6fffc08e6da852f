//! Analysis pane rendering.
//!
//! Displays the current analysis: status and load time with a session trend,
//! the issue verdict, the SEO tag table, issues with AI feedback, and the
//! search/social previews.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use sitescope_types::AnalysisResult;

use crate::app::App;
use crate::data::duration::format_millis;
use crate::data::load::issue_verdict;
use crate::data::LoadSpeed;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Number of samples drawn in the load-time trend.
const SPARKLINE_WIDTH: usize = 16;

/// Placeholder for SEO tags the page does not declare.
pub const NOT_SET: &str = "Not set";

/// Render the analysis pane.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let vm = app.dashboard().analysis();

    let Some(result) = vm.current() else {
        let (text, style) = if vm.is_loading() {
            ("Analyzing...".to_string(), Style::default().fg(app.theme.highlight))
        } else if let Some(err) = vm.error_message() {
            (format!("Error: {}", err), Style::default().fg(app.theme.critical))
        } else {
            (
                "Enter a URL and press Enter to analyze.".to_string(),
                app.theme.muted,
            )
        };
        let paragraph = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(pane_block(app, " Analysis "));
        frame.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(6),  // Summary
        Constraint::Length(13), // SEO tags
        Constraint::Min(4),     // Issues & feedback
        Constraint::Length(6),  // Previews
    ])
    .split(area);

    render_summary(frame, app, result, chunks[0]);
    render_seo_tags(frame, app, result, chunks[1]);
    render_issues(frame, app, result, chunks[2]);
    render_previews(frame, app, result, chunks[3]);
}

fn pane_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_summary(frame: &mut Frame, app: &App, result: &AnalysisResult, area: Rect) {
    let vm = app.dashboard().analysis();
    let history = app.dashboard().history();
    let speed = LoadSpeed::classify(result.load_time_ms);

    let mut load_line = vec![
        Span::raw("Load    "),
        Span::styled(
            format_millis(result.load_time_ms),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(speed.label(), app.theme.speed_style(speed)),
    ];
    let trend = sparkline_text(&history.sparkline(&result.url));
    if !trend.is_empty() {
        load_line.push(Span::raw("  "));
        load_line.push(Span::styled(trend, Style::default().fg(app.theme.highlight)));
    }
    if let Some(delta) = history.delta(&result.url) {
        load_line.push(Span::raw(format!(" {}", format_delta(delta))));
    }

    let issue_style = if result.has_issues() {
        Style::default().fg(app.theme.warning)
    } else {
        Style::default().fg(app.theme.healthy)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Status  "),
            Span::styled(
                result.status_code.to_string(),
                app.theme.status_code_style(result.status_code),
            ),
            Span::raw("  "),
            Span::raw(result.url.clone()),
        ]),
        Line::from(load_line),
        Line::from(vec![
            Span::raw("Issues  "),
            Span::styled(result.issues.len().to_string(), issue_style),
            Span::raw("  "),
            Span::styled(issue_verdict(result.issues.len()), issue_style),
            Span::raw(format!(
                "  │ SEO tags {}/{}",
                result.seo_tags.present_count(),
                sitescope_types::SeoTag::ALL.len()
            )),
        ]),
    ];

    if vm.is_loading() {
        lines.push(Line::from(Span::styled(
            format!("Analyzing {}...", vm.selected_url()),
            Style::default().fg(app.theme.highlight),
        )));
    } else if let Some(err) = vm.error_message() {
        lines.push(Line::from(Span::styled(
            format!("Error: {}", err),
            Style::default().fg(app.theme.critical),
        )));
    }

    let paragraph = Paragraph::new(lines).block(pane_block(app, " Summary "));
    frame.render_widget(paragraph, area);
}

fn render_seo_tags(frame: &mut Frame, app: &App, result: &AnalysisResult, area: Rect) {
    let rows: Vec<Row> = result
        .seo_tags
        .entries()
        .map(|(tag, value)| {
            let value_cell = match value {
                Some(v) => Cell::from(v.to_string()),
                None => Cell::from(NOT_SET).style(app.theme.muted),
            };
            Row::new(vec![Cell::from(tag.label()), value_cell])
        })
        .collect();

    let widths = [Constraint::Length(20), Constraint::Fill(1)];
    let table = Table::new(rows, widths).block(pane_block(app, " SEO Tags "));

    frame.render_widget(table, area);
}

fn render_issues(frame: &mut Frame, app: &App, result: &AnalysisResult, area: Rect) {
    let mut lines: Vec<Line> = if result.issues.is_empty() {
        vec![Line::from(Span::styled(
            "No issues found",
            Style::default().fg(app.theme.healthy),
        ))]
    } else {
        result
            .issues
            .iter()
            .map(|issue| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(app.theme.warning)),
                    Span::raw(issue.clone()),
                ])
            })
            .collect()
    };

    if !result.ai_feedback.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("AI feedback", app.theme.header)));
        lines.extend(result.ai_feedback.lines().map(|l| Line::from(l.to_string())));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(pane_block(app, " Issues & Feedback "));
    frame.render_widget(paragraph, area);
}

fn render_previews(frame: &mut Frame, app: &App, result: &AnalysisResult, area: Rect) {
    let value = |text: &str| -> Span<'static> {
        if text.is_empty() {
            Span::styled(NOT_SET, app.theme.muted)
        } else {
            Span::raw(text.to_string())
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Google  ", app.theme.header),
            value(&result.google_preview.title),
        ]),
        Line::from(vec![Span::raw("        "), value(&result.google_preview.snippet)]),
        Line::from(vec![
            Span::styled("Social  ", app.theme.header),
            value(&result.social_preview.title),
        ]),
        Line::from(vec![
            Span::raw("        "),
            value(&result.social_preview.description),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(pane_block(app, " Previews "));
    frame.render_widget(paragraph, area);
}

/// Draw load times as a text sparkline, scaled to the largest sample.
fn sparkline_text(values: &[u64]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let start = values.len().saturating_sub(SPARKLINE_WIDTH);
    let values = &values[start..];
    let max = values.iter().copied().max().unwrap_or(0).max(1);

    values
        .iter()
        .map(|&v| {
            let level = (v * 7 / max) as usize;
            SPARKLINE_CHARS[level.min(7)]
        })
        .collect()
}

/// Format a load-time change, e.g. "+12 ms" or "-40 ms".
fn format_delta(delta: f64) -> String {
    format!("{:+.0} ms", delta)
}
