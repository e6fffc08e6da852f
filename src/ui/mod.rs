//! Terminal UI rendering using ratatui.
//!
//! Each pane is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`form`]: URL input field and its validation message
//! - [`analysis`]: Summary, load time, SEO tags, issues, AI feedback and previews
//! - [`recent`]: Recently analyzed sites, selectable to re-run an analysis
//! - [`traceroute`]: Hop table of the latest traceroute
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Header (common::render_header)               │
//! ├──────────────────────────────────────────────┤
//! │ URL field (form::render)                     │
//! ├────────────────────────────┬─────────────────┤
//! │                            │ recent::render  │
//! │ analysis::render           ├─────────────────┤
//! │                            │ traceroute::    │
//! │                            │ render          │
//! ├────────────────────────────┴─────────────────┤
//! │ Status Bar (common::render_status_bar)       │
//! └──────────────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top: common::render_help
//! ```

pub mod analysis;
pub mod common;
pub mod form;
pub mod recent;
pub mod theme;
pub mod traceroute;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Minimum terminal size for usable display
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

/// Render the whole dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.warning));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5u16.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(4), // URL field + validation message
        Constraint::Min(12),   // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    form::render(frame, app, chunks[1]);

    let columns =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(chunks[2]);
    analysis::render(frame, app, columns[0]);

    let side = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);
    recent::render(frame, app, side[0]);
    traceroute::render(frame, app, side[1]);

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};

    use crate::api::fake::ScriptedApi;
    use crate::app::App;
    use crate::runner::Controller;
    use crate::ui::Theme;
    use crate::view::AnalysisPolicy;

    pub fn app(api: &Arc<ScriptedApi>) -> App {
        let controller = Controller::new(api.clone(), AnalysisPolicy::default());
        App::new(controller, None, Theme::dark())
    }

    /// Render the app into a 120x40 buffer and return it as text.
    pub fn draw(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| super::render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}
