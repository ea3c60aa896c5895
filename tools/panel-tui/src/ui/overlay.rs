//! Popups drawn over the dashboard: modals, the module picker and help.

use crate::app::App;
use panel_core::{render::modal_fragment, Control, SETUP_MODULES};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Widest a modal grows; wide enough for an ed25519 public key on one row.
const MODAL_MAX_WIDTH: u16 = 110;

/// Draw whichever popup is active. An open modal wins.
pub fn render(frame: &mut Frame, app: &App) {
    if let Some(modal) = app.panel.modals().top() {
        let width = frame.area().width.saturating_sub(4).min(MODAL_MAX_WIDTH);
        let text = hard_wrap(&modal_fragment(modal), usize::from(width.saturating_sub(2)));
        let height = u16::try_from(text.lines.len()).unwrap_or(u16::MAX).saturating_add(2);
        let area = centered_rect(width, height, frame.area());
        frame.render_widget(Clear, area);

        let mut title = format!(" {} ", modal.title);
        if app.panel.modals().len() > 1 {
            title = format!(" {} (1 of {}) ", modal.title, app.panel.modals().len());
        }
        let body = Paragraph::new(text)
            .block(popup(title, Color::Green).title_bottom(" [Esc/Enter] Close "));
        frame.render_widget(body, area);
    } else if let Some(row) = app.module_picker {
        render_module_picker(frame, row);
    } else if app.show_help {
        render_help(frame);
    }
}

fn render_module_picker(frame: &mut Frame, row: usize) {
    let height = u16::try_from(SETUP_MODULES.len()).unwrap_or(u16::MAX) + 2;
    let area = centered_rect(40, height, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = SETUP_MODULES
        .iter()
        .map(|name| ListItem::new(format!(" {name}")))
        .collect();
    let list = List::new(items)
        .block(popup(" RUN MODULE ".to_string(), Color::Yellow))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default().with_selected(Some(row));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_help(frame: &mut Frame) {
    let key = Style::default().fg(Color::Yellow);
    let mut lines: Vec<Line> = Control::ALL
        .iter()
        .map(|control| {
            Line::from(vec![
                Span::styled(format!("  {}      ", control.hotkey()), key),
                Span::raw(control.label()),
            ])
        })
        .collect();
    lines.extend([
        Line::from(""),
        Line::from(vec![Span::styled("  m      ", key), Span::raw("Run a setup module")]),
        Line::from(vec![Span::styled("  s      ", key), Span::raw("Switch selected repo remote to SSH")]),
        Line::from(vec![Span::styled("  ↑/↓    ", key), Span::raw("Select git project")]),
        Line::from(vec![Span::styled("  Esc    ", key), Span::raw("Close popup")]),
        Line::from(vec![Span::styled("  q      ", key), Span::raw("Quit")]),
    ]);

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX) + 2;
    let area = centered_rect(50, height, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(popup(" HELP ".to_string(), Color::Cyan)),
        area,
    );
}

fn popup(title: String, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black))
}

/// Break every line at exactly `width` characters, keeping span styles.
///
/// Keys and URLs have no useful word boundaries, so breaks never move
/// text around and the row count is known before drawing.
fn hard_wrap(text: &Text<'static>, width: usize) -> Text<'static> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for line in &text.lines {
        let mut row: Vec<Span<'static>> = Vec::new();
        let mut used = 0;
        for span in &line.spans {
            let mut chunk = String::new();
            for ch in span.content.chars() {
                if used == width {
                    if !chunk.is_empty() {
                        row.push(Span::styled(std::mem::take(&mut chunk), span.style));
                    }
                    lines.push(Line::from(std::mem::take(&mut row)).style(line.style));
                    used = 0;
                }
                chunk.push(ch);
                used += 1;
            }
            if !chunk.is_empty() {
                row.push(Span::styled(chunk, span.style));
            }
        }
        lines.push(Line::from(row).style(line.style));
    }

    Text::from(lines)
}

/// Rectangle of `width` columns by `height` rows centered in `area`, clipped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
