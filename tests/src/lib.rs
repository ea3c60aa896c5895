//! # Control Panel Test Suite
//!
//! Scenarios that drive the panel the way the terminal client does: wire
//! frames in, outbound events and screen regions out.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs       # Inbound events, controls and their log traces
//!     └── wire_flows.rs  # Socket.IO frames through the codec into the panel
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p panel-tests
//! cargo test -p panel-tests integration::flows
//! ```

pub mod integration;
