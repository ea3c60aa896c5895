//! Ports layer: traits the core depends on.

pub mod outbound;

pub use outbound::{ActionSink, FixedTimeSource, RecordingSink, SystemTimeSource, TimeSource};
