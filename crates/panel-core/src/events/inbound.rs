//! Inbound events pushed by the backend.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::{DiskUsageMap, GitProject, ServiceStatusMap, Severity};
use crate::error::PanelError;

/// Event names as they appear on the wire.
pub mod names {
    pub const SYSTEM_STATUS: &str = "system_status";
    pub const DISK_USAGE: &str = "disk_usage";
    pub const GIT_PROJECTS: &str = "git_projects";
    pub const SSH_KEY: &str = "ssh_key";
    pub const LOG: &str = "log";
    pub const GEMINI_AUTH: &str = "gemini_auth";
    pub const GEMINI_AUTH_FLOW: &str = "gemini_auth_flow";
    pub const TASK_START: &str = "task_start";
    pub const TASK_LOG: &str = "task_log";
    pub const TASK_COMPLETE: &str = "task_complete";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyPayload {
    pub key: String,
}

/// Backend-authored log line. A missing or null level means info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPayload {
    pub message: String,
    #[serde(default, deserialize_with = "level_or_info")]
    pub level: Severity,
}

fn level_or_info<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Severity, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .map(Severity::from)
        .unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiAuthPayload {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiAuthFlowPayload {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStartPayload {
    pub task: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletePayload {
    pub task: String,
    pub exit_code: i32,
}

/// Every event the backend can push, with its typed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    SystemStatus(ServiceStatusMap),
    DiskUsage(DiskUsageMap),
    GitProjects(Vec<GitProject>),
    SshKey(SshKeyPayload),
    Log(LogPayload),
    GeminiAuth(GeminiAuthPayload),
    GeminiAuthFlow(GeminiAuthFlowPayload),
    TaskStart(TaskStartPayload),
    TaskLog(LogPayload),
    TaskComplete(TaskCompletePayload),
}

impl InboundEvent {
    /// Decode a named event and its JSON payload.
    ///
    /// Unknown names yield [`PanelError::UnknownEvent`]; payloads missing
    /// required fields or carrying the wrong types yield
    /// [`PanelError::MalformedPayload`].
    pub fn decode(name: &str, data: Value) -> Result<Self, PanelError> {
        use names::*;

        match name {
            SYSTEM_STATUS => parse(name, data).map(Self::SystemStatus),
            DISK_USAGE => parse(name, data).map(Self::DiskUsage),
            GIT_PROJECTS => parse(name, data).map(Self::GitProjects),
            SSH_KEY => parse(name, data).map(Self::SshKey),
            LOG => parse(name, data).map(Self::Log),
            GEMINI_AUTH => parse(name, data).map(Self::GeminiAuth),
            GEMINI_AUTH_FLOW => parse(name, data).map(Self::GeminiAuthFlow),
            TASK_START => parse(name, data).map(Self::TaskStart),
            TASK_LOG => parse(name, data).map(Self::TaskLog),
            TASK_COMPLETE => parse(name, data).map(Self::TaskComplete),
            other => Err(PanelError::UnknownEvent(other.to_string())),
        }
    }

    /// Wire name of this event.
    pub fn name(&self) -> &'static str {
        use names::*;

        match self {
            Self::SystemStatus(_) => SYSTEM_STATUS,
            Self::DiskUsage(_) => DISK_USAGE,
            Self::GitProjects(_) => GIT_PROJECTS,
            Self::SshKey(_) => SSH_KEY,
            Self::Log(_) => LOG,
            Self::GeminiAuth(_) => GEMINI_AUTH,
            Self::GeminiAuthFlow(_) => GEMINI_AUTH_FLOW,
            Self::TaskStart(_) => TASK_START,
            Self::TaskLog(_) => TASK_LOG,
            Self::TaskComplete(_) => TASK_COMPLETE,
        }
    }
}

fn parse<T: DeserializeOwned>(event: &str, data: Value) -> Result<T, PanelError> {
    serde_json::from_value(data).map_err(|e| PanelError::MalformedPayload {
        event: event.to_string(),
        reason: e.to_string(),
    })
}
