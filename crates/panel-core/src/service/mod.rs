//! Service layer: orchestration over the domain.

pub mod dispatcher;
pub mod panel;

pub use dispatcher::{ActionDispatcher, Control};
pub use panel::ControlPanel;
