//! Pure projections from state to display fragments.
//!
//! Every function here is side-effect free and idempotent: the same input
//! always yields an equal `Text`. Regions are always replaced whole.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use crate::domain::{
    ConnectionState, DiskUsageMap, GitProject, LogStream, Modal, ModalBody, ServiceStatusMap,
    Severity,
};

pub const DISK_PLACEHOLDER: &str = "Loading disk information...";
pub const GIT_PLACEHOLDER: &str = "No Git projects detected";

/// Width of the service-name column in the status card.
const LABEL_WIDTH: usize = 12;

/// A named screen area owned by exactly one render function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Status,
    Disk,
    Git,
    Connection,
    Log,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Status,
        Region::Disk,
        Region::Git,
        Region::Connection,
        Region::Log,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

pub fn online_style() -> Style {
    Style::default().fg(Color::Green)
}

pub fn offline_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Style class for a log severity; unknown levels are neutral.
pub fn severity_style(severity: &Severity) -> Style {
    let color = match severity {
        Severity::Info => Color::Blue,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Unknown(_) => Color::Gray,
    };
    Style::default().fg(color)
}

/// One row per known service, fixed order.
pub fn status_fragment(status: &ServiceStatusMap) -> Text<'static> {
    status
        .iter()
        .map(|(service, online)| {
            let (label, style) = if online {
                ("Online", online_style())
            } else {
                ("Offline", offline_style())
            };
            Line::from(vec![
                Span::raw(format!("{:<width$}", service.label(), width = LABEL_WIDTH)),
                Span::styled(label, style),
            ])
        })
        .collect::<Vec<_>>()
        .into()
}

/// One row per entry, or the placeholder.
pub fn disk_fragment(disk: &DiskUsageMap) -> Text<'static> {
    if disk.is_empty() {
        return placeholder(DISK_PLACEHOLDER);
    }

    disk.iter()
        .map(|(path, size)| {
            Line::from(vec![
                Span::raw(format!("{path:<14}")),
                Span::styled(size.to_string(), Style::default().fg(Color::Cyan)),
            ])
        })
        .collect::<Vec<_>>()
        .into()
}

/// One block per project, or the placeholder.
pub fn git_fragment(projects: &[GitProject]) -> Text<'static> {
    if projects.is_empty() {
        return placeholder(GIT_PLACEHOLDER);
    }

    let mut lines = Vec::with_capacity(projects.len() * 2);
    for project in projects {
        lines.push(Line::from(vec![
            Span::styled(
                project.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(project.branch.clone(), Style::default().fg(Color::Blue)),
        ]));

        lines.push(if project.has_changes {
            Line::styled("  ● Pending changes", offline_style())
        } else {
            Line::styled("  ✓ Clean", online_style())
        });

        if let Some(commit) = &project.last_commit {
            lines.push(Line::styled(
                format!("  {commit}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    lines.into()
}

/// The connection indicator.
pub fn connection_fragment(state: ConnectionState) -> Text<'static> {
    let (symbol, style) = if state.is_connected() {
        ("●", online_style())
    } else {
        ("○", offline_style())
    };
    Line::styled(format!("{symbol} {}", state.label()), style).into()
}

/// All retained entries, oldest first.
pub fn log_fragment(log: &LogStream) -> Text<'static> {
    log.entries()
        .map(|entry| Line::styled(entry.line(), severity_style(&entry.severity)))
        .collect::<Vec<_>>()
        .into()
}

/// Body of a modal. Secrets are reproduced line for line, unstyled.
pub fn modal_fragment(modal: &Modal) -> Text<'static> {
    match &modal.body {
        ModalBody::Secret(text) => Text::raw(text.clone()),
        ModalBody::Link { prompt, url } => Text::from(vec![
            Line::raw(prompt.clone()),
            Line::raw(""),
            Line::styled(
                url.clone(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    }
}

fn placeholder(text: &'static str) -> Text<'static> {
    Line::styled(text, Style::default().fg(Color::DarkGray)).into()
}

/// Last rendered fragment per region.
///
/// A region only changes through [`RegionCache::replace`], which swaps the
/// whole fragment and bumps that region's generation.
#[derive(Debug, Clone, Default)]
pub struct RegionCache {
    fragments: [Text<'static>; 5],
    generations: [u64; 5],
}

impl RegionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fragment(&self, region: Region) -> &Text<'static> {
        &self.fragments[region.index()]
    }

    /// Number of times the region has been replaced.
    pub fn generation(&self, region: Region) -> u64 {
        self.generations[region.index()]
    }

    pub fn replace(&mut self, region: Region, fragment: Text<'static>) {
        self.fragments[region.index()] = fragment;
        self.generations[region.index()] += 1;
    }
}
