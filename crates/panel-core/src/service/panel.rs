//! The control panel service.
//!
//! `ControlPanel` owns every piece of client state and is the only writer
//! to it. Handlers run to completion synchronously; the host feeds it
//! transport callbacks and operator input one at a time.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{
    ConnectionState, LogStream, Modal, ModalStack, PanelConfig, Severity, StateStore,
};
use crate::error::PanelError;
use crate::events::{Action, InboundEvent};
use crate::ports::{ActionSink, TimeSource};
use crate::render::{self, Region, RegionCache};

use super::dispatcher::{ActionDispatcher, Control};

/// Applies inbound events and operator controls to the panel state.
pub struct ControlPanel<S: ActionSink> {
    store: StateStore,
    log: LogStream,
    modals: ModalStack,
    connection: ConnectionState,
    regions: RegionCache,
    dispatcher: ActionDispatcher<S>,
}

impl<S: ActionSink> ControlPanel<S> {
    pub fn new(config: &PanelConfig, sink: S, clock: Arc<dyn TimeSource>) -> Self {
        let mut panel = Self {
            store: StateStore::new(),
            log: LogStream::new(config.log_capacity, clock),
            modals: ModalStack::new(),
            connection: ConnectionState::default(),
            regions: RegionCache::new(),
            dispatcher: ActionDispatcher::new(sink),
        };

        panel.log.success("[INFO] Control panel started");
        panel.log.info("[INFO] Waiting for WebSocket connection...");
        for region in Region::ALL {
            panel.render(region);
        }
        panel
    }

    // === Connection callbacks ===

    pub fn on_connect(&mut self) {
        self.connection.connect();
        info!("Connected to backend");
        self.render(Region::Connection);
        self.append_log("[WS] Connected to server", Severity::Success);
    }

    pub fn on_disconnect(&mut self) {
        self.connection.disconnect();
        info!("Disconnected from backend");
        self.render(Region::Connection);
        self.append_log("[WS] Disconnected from server", Severity::Error);
    }

    // === Inbound events ===

    /// Decode and apply a named event.
    ///
    /// A malformed payload is dropped: the slice keeps its previous
    /// snapshot and a warning entry is logged. Unknown names are ignored.
    pub fn on_event(&mut self, name: &str, data: Value) {
        match InboundEvent::decode(name, data) {
            Ok(event) => self.handle(event),
            Err(PanelError::UnknownEvent(name)) => {
                debug!(event = %name, "Ignoring unknown event");
            }
            Err(PanelError::MalformedPayload { event, reason }) => {
                warn!(event = %event, reason = %reason, "Dropping malformed payload");
                self.append_log(
                    format!("[WARN] Ignored malformed {event} payload: {reason}"),
                    Severity::Warning,
                );
            }
            Err(e) => {
                warn!(event = name, error = %e, "Dropping event");
            }
        }
    }

    /// Apply a decoded event.
    pub fn handle(&mut self, event: InboundEvent) {
        debug!(event = event.name(), "Inbound event");

        match event {
            InboundEvent::SystemStatus(status) => {
                self.store.replace_status(status);
                self.render(Region::Status);
                self.append_log("[UPDATE] System status updated", Severity::Info);
            }
            InboundEvent::DiskUsage(disk) => {
                self.store.replace_disk(disk);
                self.render(Region::Disk);
                self.append_log("[UPDATE] Disk usage updated", Severity::Info);
            }
            InboundEvent::GitProjects(projects) => {
                self.store.replace_git(projects);
                self.render(Region::Git);
                self.append_log("[UPDATE] Git projects updated", Severity::Info);
            }
            InboundEvent::SshKey(payload) => {
                self.modals.open(Modal::secret("SSH Public Key", payload.key));
                self.append_log("[SSH] Public key shown", Severity::Success);
            }
            InboundEvent::Log(payload) | InboundEvent::TaskLog(payload) => {
                self.append_log(payload.message, payload.level);
            }
            InboundEvent::GeminiAuth(payload) => {
                if payload.authenticated {
                    self.append_log("[GEMINI] Gemini authenticated", Severity::Success);
                } else {
                    self.append_log("[GEMINI] Gemini not authenticated", Severity::Warning);
                }
            }
            InboundEvent::GeminiAuthFlow(payload) => {
                self.modals.open(Modal::link(
                    "Complete Gemini Login",
                    "Open the following URL to complete the login:",
                    payload.url,
                ));
                self.append_log("[GEMINI] Authentication URL shown", Severity::Info);
            }
            InboundEvent::TaskStart(payload) => {
                self.append_log(format!("[TASK] Starting {}", payload.task), Severity::Info);
            }
            InboundEvent::TaskComplete(payload) => {
                let severity = if payload.exit_code == 0 {
                    Severity::Success
                } else {
                    Severity::Error
                };
                self.append_log(
                    format!("[TASK] Finished {} (exit {})", payload.task, payload.exit_code),
                    severity,
                );
            }
        }
    }

    // === Operator input ===

    pub fn dispatch(&mut self, control: Control) {
        self.dispatcher.dispatch(control, &mut self.log);
        self.render(Region::Log);
    }

    /// Ask the backend to run a setup module.
    pub fn run_module(&mut self, name: &str) -> Result<(), PanelError> {
        let action = Action::run_module(name)?;
        self.dispatcher.dispatch_action(
            action,
            &format!("[ACTION] Running module {name}..."),
            &mut self.log,
        );
        self.render(Region::Log);
        Ok(())
    }

    /// Ask the backend to switch a project's origin remote to SSH.
    pub fn set_repo_remote_ssh(&mut self, index: usize) -> Result<(), PanelError> {
        let project = self
            .store
            .git()
            .get(index)
            .ok_or(PanelError::ProjectNotFound(index))?;
        let path = project
            .path
            .clone()
            .ok_or_else(|| PanelError::MissingProjectPath(project.name.clone()))?;
        let intent = format!("[ACTION] Switching {} remote to SSH...", project.name);

        self.dispatcher
            .dispatch_action(Action::set_repo_remote_ssh(path), &intent, &mut self.log);
        self.render(Region::Log);
        Ok(())
    }

    /// Dismiss the topmost modal.
    pub fn close_modal(&mut self) -> Option<Modal> {
        self.modals.close()
    }

    // === Read access ===

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn log(&self) -> &LogStream {
        &self.log
    }

    pub fn modals(&self) -> &ModalStack {
        &self.modals
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn regions(&self) -> &RegionCache {
        &self.regions
    }

    pub fn sink(&self) -> &S {
        self.dispatcher.sink()
    }

    fn append_log(&mut self, message: impl Into<String>, severity: Severity) {
        self.log.append(message, severity);
        self.render(Region::Log);
    }

    fn render(&mut self, region: Region) {
        let fragment = match region {
            Region::Status => render::status_fragment(self.store.status()),
            Region::Disk => render::disk_fragment(self.store.disk()),
            Region::Git => render::git_fragment(self.store.git()),
            Region::Connection => render::connection_fragment(self.connection),
            Region::Log => render::log_fragment(&self.log),
        };
        self.regions.replace(region, fragment);
    }
}
