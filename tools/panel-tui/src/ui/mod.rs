//! UI module for TUI rendering.
//!
//! Cards draw the fragments cached by the panel; this module only lays
//! them out and adds the chrome around them.

pub mod cards;
pub mod overlay;

use crate::app::App;
use panel_core::Region;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(10), // Status + Disk + Git
            Constraint::Min(8),     // Actions + Log
            Constraint::Length(3),  // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    cards::render_cards(frame, app, chunks[1]);
    cards::render_activity(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    overlay::render(frame, app);
}

/// Render the header bar.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let indicator = app.panel.regions().fragment(Region::Connection);
    let mut spans = vec![Span::raw(" ")];
    spans.extend(first_line(indicator).spans);
    spans.extend([
        Span::raw("    Backend: "),
        Span::styled(app.backend_url.clone(), Style::default().fg(Color::Cyan)),
        Span::raw("    Uptime: "),
        Span::styled(app.uptime_str(), Style::default().fg(Color::Cyan)),
    ]);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" DEV-HOST CONTROL PANEL ")
            .title_style(Style::default().add_modifier(Modifier::BOLD)),
    );

    frame.render_widget(header, area);
}

/// Render the footer bar.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let mut spans = vec![
        Span::styled(" [1-7] ", key),
        Span::raw("Actions  "),
        Span::styled("[M] ", key),
        Span::raw("Modules  "),
        Span::styled("[S] ", key),
        Span::raw("Remote→SSH  "),
        Span::styled("[↑↓] ", key),
        Span::raw("Project  "),
        Span::styled("[?] ", key),
        Span::raw("Help  "),
        Span::styled("[Q] ", key),
        Span::raw("Quit"),
    ];

    if let Some(error) = &app.last_error {
        spans.push(Span::raw("  │ "));
        spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn first_line(text: &Text<'static>) -> Line<'static> {
    text.lines.first().cloned().unwrap_or_default()
}
