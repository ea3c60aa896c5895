//! Domain layer: panel state with no I/O.

pub mod config;
pub mod connection;
pub mod disk;
pub mod git;
pub mod log;
pub mod modal;
pub mod status;
pub mod store;

pub use config::{PanelConfig, PanelConfigBuilder, DEFAULT_BACKEND_URL};
pub use connection::ConnectionState;
pub use disk::DiskUsageMap;
pub use git::GitProject;
pub use log::{LogEntry, LogStream, Severity, DEFAULT_LOG_CAPACITY};
pub use modal::{Modal, ModalBody, ModalStack};
pub use status::{Service, ServiceStatusMap};
pub use store::StateStore;
