//! Application state management.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use panel_core::{Control, ControlPanel, PanelConfig, SystemTimeSource, SETUP_MODULES};
use tracing::warn;

use crate::transport::{ChannelSink, TransportEvent};

/// Everything the screen shows plus the UI-only bits around it.
pub struct App {
    /// Panel state and handlers.
    pub panel: ControlPanel<ChannelSink>,

    /// Backend the transport points at.
    pub backend_url: String,

    /// Whether the app should quit.
    pub should_quit: bool,

    /// Help overlay visible.
    pub show_help: bool,

    /// Highlighted row of the open module picker.
    pub module_picker: Option<usize>,

    /// Highlighted git project.
    pub selected_project: usize,

    /// Last transport or input error, shown in the footer.
    pub last_error: Option<String>,

    /// Application start time.
    pub start_time: Instant,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: &PanelConfig, sink: ChannelSink) -> Self {
        Self {
            panel: ControlPanel::new(config, sink, Arc::new(SystemTimeSource)),
            backend_url: config.backend_url.clone(),
            should_quit: false,
            show_help: false,
            module_picker: None,
            selected_project: 0,
            last_error: None,
            start_time: Instant::now(),
        }
    }

    /// Handle an event from the transport task.
    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => {
                self.last_error = None;
                self.panel.on_connect();
            }
            TransportEvent::Disconnected => self.panel.on_disconnect(),
            TransportEvent::Event { name, data } => {
                self.panel.on_event(&name, data);
                self.clamp_selection();
            }
            TransportEvent::Error(msg) => {
                warn!(error = %msg, "Transport error");
                self.last_error = Some(msg);
            }
        }
    }

    /// Handle key press events.
    ///
    /// An open modal captures input until dismissed, then the module picker,
    /// then the help overlay.
    pub fn on_key(&mut self, key: KeyCode) {
        if !self.panel.modals().is_empty() {
            if matches!(key, KeyCode::Esc | KeyCode::Enter) {
                self.panel.close_modal();
            }
            return;
        }

        if let Some(row) = self.module_picker {
            self.on_picker_key(row, key);
            return;
        }

        if self.show_help {
            if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.module_picker = Some(0);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                if let Err(e) = self.panel.set_repo_remote_ssh(self.selected_project) {
                    warn!(error = %e, "Cannot switch remote");
                    self.last_error = Some(e.to_string());
                }
            }
            // List navigation
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_project = self.selected_project.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.panel.store().git().len().saturating_sub(1);
                if self.selected_project < max {
                    self.selected_project += 1;
                }
            }
            KeyCode::Char(c) => {
                if let Some(control) = Control::from_hotkey(c) {
                    self.panel.dispatch(control);
                }
            }
            _ => {}
        }
    }

    fn on_picker_key(&mut self, row: usize, key: KeyCode) {
        match key {
            KeyCode::Esc => self.module_picker = None,
            KeyCode::Up => self.module_picker = Some(row.saturating_sub(1)),
            KeyCode::Down => {
                self.module_picker = Some((row + 1).min(SETUP_MODULES.len() - 1));
            }
            KeyCode::Enter => {
                self.module_picker = None;
                if let Err(e) = self.panel.run_module(SETUP_MODULES[row]) {
                    warn!(error = %e, "Cannot run module");
                    self.last_error = Some(e.to_string());
                }
            }
            _ => {}
        }
    }

    fn clamp_selection(&mut self) {
        let max = self.panel.store().git().len().saturating_sub(1);
        self.selected_project = self.selected_project.min(max);
    }

    /// Get uptime duration.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Format uptime as human-readable string.
    pub fn uptime_str(&self) -> String {
        let secs = self.uptime().as_secs();

        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;

        if hours > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}m", mins)
        }
    }
}
