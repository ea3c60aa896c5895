//! Outbound (Driven) ports for the control panel.
//!
//! These traits define what the core needs from its host: somewhere to
//! emit outbound events and a wall clock for log timestamps.

use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate};

use crate::error::PanelError;
use crate::events::OutboundEvent;

/// Destination for outbound events.
///
/// Fire-and-forget: implementations must not block and return no reply.
/// A returned error only means the event never left the client.
pub trait ActionSink: Send + Sync {
    fn send(&self, event: &OutboundEvent) -> Result<(), PanelError>;
}

impl<S: ActionSink + ?Sized> ActionSink for std::sync::Arc<S> {
    fn send(&self, event: &OutboundEvent) -> Result<(), PanelError> {
        (**self).send(event)
    }
}

/// Time source for log timestamps.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Time source that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    instant: DateTime<Local>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<Local>) -> Self {
        Self { instant }
    }

    /// 2024-01-01 at the given local wall-clock time.
    pub fn at_hms(hour: u32, min: u32, sec: u32) -> Self {
        let instant = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .and_then(|naive| naive.and_local_timezone(Local).earliest())
            .unwrap_or_else(Local::now);
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.instant
    }
}

/// Sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<OutboundEvent>>,
    fail_with: Option<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every send fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(reason.into()),
        }
    }

    /// Events sent so far, oldest first.
    pub fn sent(&self) -> Vec<OutboundEvent> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl ActionSink for RecordingSink {
    fn send(&self, event: &OutboundEvent) -> Result<(), PanelError> {
        if let Some(reason) = &self.fail_with {
            return Err(PanelError::Sink(reason.clone()));
        }
        self.sent
            .lock()
            .map_err(|e| PanelError::Sink(e.to_string()))?
            .push(event.clone());
        Ok(())
    }
}
