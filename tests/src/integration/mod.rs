//! Cross-module scenarios.

pub mod flows;
pub mod wire_flows;
