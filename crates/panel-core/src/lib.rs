//! # Panel Core
//!
//! Client-side core of the dev-host control panel: keeps a local mirror of
//! the state the backend pushes, turns operator controls into outbound
//! events, and narrates everything into a time-stamped log stream.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure data, no I/O
//!   - `StateStore`: the three independently replaced slices
//!   - `LogStream`: bounded append-only log
//!   - `ModalStack`: transient overlays
//!   - `ConnectionState`: the connect/disconnect state machine
//!   - `PanelConfig`: configuration with validation
//!
//! - **Events Layer** (`events/`): closed tagged types for every inbound
//!   event name and the single outbound `action` event
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `ActionSink`: driven port the dispatcher emits into
//!   - `TimeSource`: wall clock used to stamp log entries
//!
//! - **Render Layer** (`render/`): pure `slice -> Text` projections and the
//!   `RegionCache` that replaces whole regions on change
//!
//! - **Service Layer** (`service/`): orchestration
//!   - `ControlPanel`: applies inbound events, owns all state
//!   - `ActionDispatcher`: fixed control table, fire-and-forget
//!
//! - **Wire Layer** (`wire/`): Socket.IO over Engine.IO text framing
//!
//! ## Flow
//!
//! ```text
//!   transport ──event──→ ControlPanel ──replace──→ StateStore
//!                            │                         │
//!                            │                     render::*
//!                            ▼                         ▼
//!                        LogStream               RegionCache
//!
//!   operator ──Control──→ ActionDispatcher ──Action──→ ActionSink
//!                            └──optimistic entry──→ LogStream
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod render;
pub mod service;
pub mod wire;

// Re-exports for convenience
pub use domain::{
    ConnectionState, DiskUsageMap, GitProject, LogEntry, LogStream, Modal, ModalBody, ModalStack,
    PanelConfig, PanelConfigBuilder, Service, ServiceStatusMap, Severity, StateStore,
    DEFAULT_BACKEND_URL, DEFAULT_LOG_CAPACITY,
};
pub use error::{ConfigError, PanelError, WireError};
pub use events::{Action, InboundEvent, OutboundEvent, SETUP_MODULES};
pub use ports::{ActionSink, FixedTimeSource, RecordingSink, SystemTimeSource, TimeSource};
pub use render::{Region, RegionCache};
pub use service::{ActionDispatcher, Control, ControlPanel};
