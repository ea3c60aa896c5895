//! `ActionSink` backed by the transport's outbound channel.

use panel_core::{ActionSink, OutboundEvent, PanelError};
use tokio::sync::mpsc;

/// Hands outbound events to the transport task without blocking.
///
/// While the backend is unreachable events wait in the channel and are
/// flushed on the next connection; a full channel rejects the send.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<OutboundEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<OutboundEvent>) -> Self {
        Self { tx }
    }
}

impl ActionSink for ChannelSink {
    fn send(&self, event: &OutboundEvent) -> Result<(), PanelError> {
        self.tx.try_send(event.clone()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                PanelError::Sink("outbound queue is full".to_string())
            }
            mpsc::error::TrySendError::Closed(_) => {
                PanelError::Sink("transport has stopped".to_string())
            }
        })
    }
}
