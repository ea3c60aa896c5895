//! Outbound events sent to the backend.
//!
//! There is a single outbound event name, `action`, whose payload carries a
//! `type` discriminator. The six plain actions send nothing else; the two
//! parameterised ones add a `params` object.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PanelError;

/// Wire name of the outbound event.
pub const ACTION_EVENT: &str = "action";

/// Setup modules the backend is willing to run.
pub const SETUP_MODULES: [&str; 8] = [
    "00-user-setup",
    "00-base-packages",
    "01-zsh-setup",
    "02-neovim-setup",
    "03-ai-integration",
    "05-ssh-setup",
    "06-fonts-setup",
    "07-local-ssh-server",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleParams {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoParams {
    pub path: String,
}

/// Payload of the `action` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ShowSshKey,
    EnableSsh,
    StartHttpServer,
    GeminiAuthStatus,
    GeminiLogin,
    TestGithubSsh,
    RunModule { params: ModuleParams },
    SetRepoRemoteSsh { params: RepoParams },
}

impl Action {
    /// Run one of [`SETUP_MODULES`].
    pub fn run_module(name: &str) -> Result<Self, PanelError> {
        if !SETUP_MODULES.contains(&name) {
            return Err(PanelError::UnknownModule(name.to_string()));
        }
        Ok(Action::RunModule {
            params: ModuleParams {
                name: name.to_string(),
            },
        })
    }

    /// Rewrite a repository's `origin` remote from HTTPS to SSH.
    pub fn set_repo_remote_ssh(path: impl Into<String>) -> Self {
        Action::SetRepoRemoteSsh {
            params: RepoParams { path: path.into() },
        }
    }

    /// Value of the `type` discriminator.
    pub fn type_id(&self) -> &'static str {
        match self {
            Action::ShowSshKey => "show_ssh_key",
            Action::EnableSsh => "enable_ssh",
            Action::StartHttpServer => "start_http_server",
            Action::GeminiAuthStatus => "gemini_auth_status",
            Action::GeminiLogin => "gemini_login",
            Action::TestGithubSsh => "test_github_ssh",
            Action::RunModule { .. } => "run_module",
            Action::SetRepoRemoteSsh { .. } => "set_repo_remote_ssh",
        }
    }
}

/// Every event the client can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    Action(Action),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::Action(_) => ACTION_EVENT,
        }
    }

    pub fn payload(&self) -> Result<Value, PanelError> {
        match self {
            OutboundEvent::Action(action) => Ok(serde_json::to_value(action)?),
        }
    }
}

impl From<Action> for OutboundEvent {
    fn from(action: Action) -> Self {
        OutboundEvent::Action(action)
    }
}
