//! Error types for the control panel core

use thiserror::Error;

/// Errors raised while applying inbound events or dispatching actions.
///
/// None of these halt the panel: the service turns each one into a log
/// entry and carries on.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Malformed {event} payload: {reason}")]
    MalformedPayload { event: String, reason: String },

    #[error("Unknown inbound event: {0}")]
    UnknownEvent(String),

    #[error("Unknown setup module: {0}")]
    UnknownModule(String),

    #[error("Git project {0} has no known path")]
    MissingProjectPath(String),

    #[error("No git project at index {0}")]
    ProjectNotFound(usize),

    #[error("Outbound channel error: {0}")]
    Sink(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the Socket.IO / Engine.IO text codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("Empty frame")]
    Empty,

    #[error("Unknown engine packet type: {0:?}")]
    UnknownEnginePacket(char),

    #[error("Unknown socket packet type: {0:?}")]
    UnknownSocketPacket(char),

    #[error("Binary socket packets are not supported")]
    BinaryUnsupported,

    #[error("Event packet without a name")]
    MissingEventName,

    #[error("Invalid JSON in frame: {0}")]
    InvalidJson(String),
}

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Backend URL must use http, https, ws or wss: {0}")]
    UnsupportedScheme(String),

    #[error("Backend URL has no host: {0}")]
    MissingHost(String),

    #[error("Log capacity must be between 1 and {max}, got {value}")]
    LogCapacity { value: usize, max: usize },
}
