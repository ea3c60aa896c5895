//! Cards for the mirrored slices, the action list and the log.

use crate::app::App;
use panel_core::{Control, GitProject, Region};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the status, disk and git cards side by side.
pub fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(area);

    let regions = app.panel.regions();

    let status = Paragraph::new(regions.fragment(Region::Status).clone())
        .block(card(" SYSTEM STATUS ", Color::Green));
    frame.render_widget(status, chunks[0]);

    let disk = Paragraph::new(regions.fragment(Region::Disk).clone())
        .block(card(" DISK USAGE ", Color::Cyan));
    frame.render_widget(disk, chunks[1]);

    render_git(frame, app, chunks[2]);
}

/// The git card, with the selected project highlighted and kept in view.
fn render_git(frame: &mut Frame, app: &App, area: Rect) {
    let projects = app.panel.store().git();
    let mut text = app.panel.regions().fragment(Region::Git).clone();
    let title = if projects.is_empty() {
        " GIT PROJECTS ".to_string()
    } else {
        format!(" GIT PROJECTS [{}/{}] ", app.selected_project + 1, projects.len())
    };

    let mut scroll = 0;
    if let Some(start) = block_start(projects, app.selected_project) {
        if let Some(line) = text.lines.get_mut(start) {
            line.style = line.style.add_modifier(Modifier::REVERSED);
        }
        let visible = usize::from(area.height.saturating_sub(2));
        scroll = (start + block_height(&projects[app.selected_project])).saturating_sub(visible);
    }

    let git = Paragraph::new(text)
        .block(card(&title, Color::Magenta))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(git, area);
}

/// Render the action list and the log stream.
pub fn render_activity(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(20)])
        .split(area);

    render_actions(frame, chunks[0]);
    render_log(frame, app, chunks[1]);
}

fn render_actions(frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = Control::ALL
        .iter()
        .map(|control| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" [{}] ", control.hotkey()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(control.label()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(card(" ACTIONS ", Color::Yellow)), area);
}

/// The log card, scrolled to the newest entry.
fn render_log(frame: &mut Frame, app: &App, area: Rect) {
    let text: &Text<'static> = app.panel.regions().fragment(Region::Log);
    let visible = usize::from(area.height.saturating_sub(2));
    let scroll = text.lines.len().saturating_sub(visible);

    let log = Paragraph::new(text.clone())
        .block(card(" LOG ", Color::Blue))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(log, area);
}

fn card(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(color))
}

/// Lines a project occupies in the git fragment.
fn block_height(project: &GitProject) -> usize {
    2 + usize::from(project.last_commit.is_some())
}

/// First line of the project's block, if it exists.
fn block_start(projects: &[GitProject], index: usize) -> Option<usize> {
    (index < projects.len()).then(|| projects[..index].iter().map(block_height).sum())
}
