//! Events layer: the closed set of messages exchanged with the backend.

pub mod inbound;
pub mod outbound;

pub use inbound::{
    GeminiAuthFlowPayload, GeminiAuthPayload, InboundEvent, LogPayload, SshKeyPayload,
    TaskCompletePayload, TaskStartPayload,
};
pub use outbound::{Action, ModuleParams, OutboundEvent, RepoParams, SETUP_MODULES};
