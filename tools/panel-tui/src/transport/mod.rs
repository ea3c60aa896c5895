//! Backend channel: Socket.IO over a WebSocket.

mod client;
mod sink;

pub use client::{SocketClient, TransportEvent};
pub use sink::ChannelSink;
