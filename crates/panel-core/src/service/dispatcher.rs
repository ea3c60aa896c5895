//! Action dispatcher: operator controls to outbound events.
//!
//! Dispatch is fire-and-forget. There is no correlation id, no pending
//! table and no timeout; whatever the backend answers arrives later as an
//! ordinary inbound event with its own log entry.

use tracing::{info, warn};

use crate::domain::LogStream;
use crate::events::{Action, OutboundEvent};
use crate::ports::ActionSink;

/// Interactive controls, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    ShowSshKey,
    EnableSsh,
    StartHttpServer,
    GeminiAuthStatus,
    GeminiLogin,
    TestGithubSsh,
    CopySshKey,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::ShowSshKey,
        Control::EnableSsh,
        Control::StartHttpServer,
        Control::GeminiAuthStatus,
        Control::GeminiLogin,
        Control::TestGithubSsh,
        Control::CopySshKey,
    ];

    /// Outbound action. Copy reuses the reveal action.
    pub fn action(&self) -> Action {
        match self {
            Control::ShowSshKey | Control::CopySshKey => Action::ShowSshKey,
            Control::EnableSsh => Action::EnableSsh,
            Control::StartHttpServer => Action::StartHttpServer,
            Control::GeminiAuthStatus => Action::GeminiAuthStatus,
            Control::GeminiLogin => Action::GeminiLogin,
            Control::TestGithubSsh => Action::TestGithubSsh,
        }
    }

    /// Optimistic log line appended on dispatch.
    pub fn intent(&self) -> &'static str {
        match self {
            Control::ShowSshKey => "[ACTION] Requesting SSH key...",
            Control::EnableSsh => "[ACTION] Enabling SSH server...",
            Control::StartHttpServer => "[ACTION] Starting HTTP server on port 9999...",
            Control::GeminiAuthStatus => "[ACTION] Checking Gemini authentication status...",
            Control::GeminiLogin => "[ACTION] Starting Gemini login...",
            Control::TestGithubSsh => "[ACTION] Testing SSH connection to GitHub...",
            Control::CopySshKey => "[ACTION] Requesting SSH key to copy...",
        }
    }

    /// Button caption.
    pub fn label(&self) -> &'static str {
        match self {
            Control::ShowSshKey => "Show SSH Key",
            Control::EnableSsh => "Enable SSH Server",
            Control::StartHttpServer => "Start HTTP Server (9999)",
            Control::GeminiAuthStatus => "Gemini Auth Status",
            Control::GeminiLogin => "Gemini Login",
            Control::TestGithubSsh => "Test GitHub SSH",
            Control::CopySshKey => "Copy SSH Key",
        }
    }

    /// Key that activates the control (`1`..`7`).
    pub fn hotkey(&self) -> char {
        let position = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        char::from(b'1' + position as u8)
    }

    pub fn from_hotkey(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.hotkey() == key)
    }
}

/// Sends actions through an [`ActionSink`] and narrates them.
#[derive(Debug)]
pub struct ActionDispatcher<S: ActionSink> {
    sink: S,
}

impl<S: ActionSink> ActionDispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Emit the control's action and append its optimistic entry.
    pub fn dispatch(&self, control: Control, log: &mut LogStream) {
        self.dispatch_action(control.action(), control.intent(), log);
    }

    /// Emit any action with a caller-supplied intent line.
    ///
    /// The intent is logged whether or not the sink accepts the event; a
    /// refused send adds a separate warning entry.
    pub fn dispatch_action(&self, action: Action, intent: &str, log: &mut LogStream) {
        let type_id = action.type_id();
        let result = self.sink.send(&OutboundEvent::Action(action));

        log.info(intent);

        match result {
            Ok(()) => info!(action = type_id, "Action dispatched"),
            Err(e) => {
                warn!(action = type_id, error = %e, "Action not sent");
                log.warning(format!("[WARN] Could not send {type_id}: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use crate::ports::{FixedTimeSource, RecordingSink};
    use std::sync::Arc;

    fn log() -> LogStream {
        LogStream::new(50, Arc::new(FixedTimeSource::at_hms(12, 0, 0)))
    }

    #[test]
    fn test_hotkeys() {
        assert_eq!(Control::ShowSshKey.hotkey(), '1');
        assert_eq!(Control::CopySshKey.hotkey(), '7');
        assert_eq!(Control::from_hotkey('3'), Some(Control::StartHttpServer));
        assert_eq!(Control::from_hotkey('8'), None);
    }

    #[test]
    fn test_copy_reuses_reveal_action() {
        assert_eq!(Control::CopySshKey.action(), Control::ShowSshKey.action());
        assert_ne!(Control::CopySshKey.intent(), Control::ShowSshKey.intent());
    }

    #[test]
    fn test_every_control_emits_once_and_logs_once() {
        for control in Control::ALL {
            let dispatcher = ActionDispatcher::new(RecordingSink::new());
            let mut log = log();

            dispatcher.dispatch(control, &mut log);

            assert_eq!(
                dispatcher.sink().sent(),
                vec![OutboundEvent::Action(control.action())]
            );
            assert_eq!(log.len(), 1);
            let entry = log.latest().unwrap();
            assert_eq!(entry.message, control.intent());
            assert_eq!(entry.severity, Severity::Info);
        }
    }

    #[test]
    fn test_failed_send_still_logs_intent() {
        let dispatcher = ActionDispatcher::new(RecordingSink::failing("channel closed"));
        let mut log = log();

        dispatcher.dispatch(Control::EnableSsh, &mut log);

        let entries: Vec<_> = log.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "[ACTION] Enabling SSH server...");
        assert_eq!(entries[1].severity, Severity::Warning);
        assert!(entries[1].message.contains("enable_ssh"));
    }
}
