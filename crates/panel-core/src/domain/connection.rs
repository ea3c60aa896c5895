//! Connection state machine.
//!
//! ```text
//! Disconnected ──connect──→ Connected ──disconnect──→ Disconnected ...
//! ```
//!
//! No terminal state; callbacks may repeat in either state.

/// Whether the channel to the backend is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Indicator text.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "WebSocket: Connected",
            ConnectionState::Disconnected => "WebSocket: Disconnected",
        }
    }

    /// Apply a connect callback. Returns the previous state.
    pub fn connect(&mut self) -> ConnectionState {
        std::mem::replace(self, ConnectionState::Connected)
    }

    /// Apply a disconnect callback. Returns the previous state.
    pub fn disconnect(&mut self) -> ConnectionState {
        std::mem::replace(self, ConnectionState::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_transitions_are_unlimited() {
        let mut state = ConnectionState::default();
        for _ in 0..3 {
            assert_eq!(state.connect(), ConnectionState::Disconnected);
            assert!(state.is_connected());
            assert_eq!(state.disconnect(), ConnectionState::Connected);
            assert!(!state.is_connected());
        }
    }

    #[test]
    fn test_repeated_connect_stays_connected() {
        let mut state = ConnectionState::Connected;
        assert_eq!(state.connect(), ConnectionState::Connected);
        assert_eq!(state.label(), "WebSocket: Connected");
    }
}
