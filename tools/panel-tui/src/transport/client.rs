//! Socket.IO client for the backend channel.
//!
//! One task owns the WebSocket. It performs the Engine.IO open and
//! Socket.IO connect handshake, answers pings, forwards named events to the
//! UI loop and writes queued actions. When the connection drops it reports
//! `Disconnected` and reconnects with capped exponential backoff.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use panel_core::wire::{EnginePacket, Handshake, SocketPacket};
use panel_core::OutboundEvent;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsWrite = SplitSink<WsStream, Message>;
type WsRead = SplitStream<WsStream>;

/// An open session plus the events the server emitted before acknowledging it.
struct Session {
    write: WsWrite,
    read: WsRead,
    handshake: Handshake,
    early_events: Vec<TransportEvent>,
}

/// Events surfaced to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Socket.IO session established.
    Connected,
    /// Session lost after having been established.
    Disconnected,
    /// Named server event.
    Event { name: String, data: Value },
    /// Connection attempt or session failure.
    Error(String),
}

/// Base delay between reconnection attempts (exponential backoff).
const RECONNECT_BASE_DELAY_SECS: u64 = 2;

/// Maximum delay between reconnection attempts.
const MAX_RECONNECT_DELAY_SECS: u64 = 60;

/// Used until the server's handshake says otherwise.
const DEFAULT_PING_DEADLINE: Duration = Duration::from_secs(45);

/// How the transport should react to one inbound text frame.
#[derive(Debug, PartialEq)]
enum Frame {
    /// Send this frame back.
    Reply(String),
    /// Forward to the UI loop.
    Forward(TransportEvent),
    /// The server ended the session.
    Closed,
    Ignore,
}

/// WebSocket client for the backend.
pub struct SocketClient {
    socket_url: String,
    event_tx: mpsc::Sender<TransportEvent>,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl SocketClient {
    /// Create a new client for a `ws://.../socket.io/?EIO=4&transport=websocket` URL.
    pub fn new(socket_url: String, event_tx: mpsc::Sender<TransportEvent>) -> Self {
        Self {
            socket_url,
            event_tx,
            shutdown_tx: None,
        }
    }

    /// Spawn the connection task. Actions are read from `action_rx`.
    pub fn start(&mut self, action_rx: mpsc::Receiver<OutboundEvent>) {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        self.shutdown_tx = Some(shutdown_tx);

        tokio::spawn(Self::connection_loop(
            self.socket_url.clone(),
            self.event_tx.clone(),
            action_rx,
            shutdown_rx,
        ));
    }

    /// Connection loop with reconnection logic.
    async fn connection_loop(
        socket_url: String,
        event_tx: mpsc::Sender<TransportEvent>,
        mut action_rx: mpsc::Receiver<OutboundEvent>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        let mut reconnect_attempts = 0u32;

        loop {
            match Self::handshake(&socket_url).await {
                Ok(session) => {
                    reconnect_attempts = 0;
                    info!(
                        sid = %session.handshake.sid,
                        early_events = session.early_events.len(),
                        "Socket.IO session established"
                    );
                    let _ = event_tx.send(TransportEvent::Connected).await;
                    for event in session.early_events {
                        let _ = event_tx.send(event).await;
                    }

                    let result = Self::run_session(
                        session.write,
                        session.read,
                        &session.handshake,
                        &event_tx,
                        &mut action_rx,
                        &mut shutdown_rx,
                    )
                    .await;

                    let _ = event_tx.send(TransportEvent::Disconnected).await;
                    match result {
                        Ok(SessionEnd::Shutdown) => break,
                        Ok(SessionEnd::Closed) => info!("Server closed the session"),
                        Err(e) => {
                            warn!(error = %e, "Session failed");
                            let _ = event_tx.send(TransportEvent::Error(e.to_string())).await;
                        }
                    }
                }
                Err(e) => {
                    debug!(error = %e, attempt = reconnect_attempts, "Connection attempt failed");
                    let _ = event_tx.send(TransportEvent::Error(format!("{e:#}"))).await;
                }
            }

            reconnect_attempts = reconnect_attempts.saturating_add(1);
            let delay_secs = calculate_backoff_delay(reconnect_attempts);
            debug!(delay_secs, "Reconnecting");

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(delay_secs)) => {}
                _ = shutdown_rx.recv() => break,
            }
        }
    }

    /// Open the WebSocket and complete the Engine.IO and Socket.IO handshakes.
    ///
    /// The server may emit events from its connect handler before the
    /// connect ack; those are kept in arrival order for the caller.
    async fn handshake(socket_url: &str) -> Result<Session> {
        let (ws_stream, _) = connect_async(socket_url)
            .await
            .context("Failed to connect to backend")?;
        let (mut write, mut read) = ws_stream.split();

        let handshake = match next_packet(&mut read).await? {
            EnginePacket::Open(handshake) => handshake,
            other => bail!("Expected open packet, got {other:?}"),
        };

        let connect = EnginePacket::Message(SocketPacket::connect()).encode();
        write
            .send(Message::Text(connect.into()))
            .await
            .context("Failed to send connect packet")?;

        let mut early_events = Vec::new();
        loop {
            match next_packet(&mut read).await? {
                EnginePacket::Message(SocketPacket::Connect { .. }) => break,
                EnginePacket::Message(SocketPacket::Event { name, data, .. }) => {
                    early_events.push(TransportEvent::Event { name, data });
                }
                EnginePacket::Message(SocketPacket::ConnectError { data, .. }) => {
                    bail!("Connection refused by server: {data}")
                }
                EnginePacket::Close | EnginePacket::Message(SocketPacket::Disconnect { .. }) => {
                    bail!("Server closed the connection before connect ack")
                }
                EnginePacket::Ping(data) => {
                    write
                        .send(Message::Text(EnginePacket::Pong(data).encode().into()))
                        .await
                        .context("Failed to send pong")?;
                }
                other => debug!(packet = ?other, "Ignoring packet before connect"),
            }
        }

        Ok(Session {
            write,
            read,
            handshake,
            early_events,
        })
    }

    /// Pump frames in both directions until the session ends.
    async fn run_session(
        mut write: WsWrite,
        mut read: WsRead,
        handshake: &Handshake,
        event_tx: &mpsc::Sender<TransportEvent>,
        action_rx: &mut mpsc::Receiver<OutboundEvent>,
        shutdown_rx: &mut mpsc::Receiver<()>,
    ) -> Result<SessionEnd> {
        let ping_deadline = ping_deadline(handshake);
        let mut deadline = Instant::now() + ping_deadline;

        loop {
            tokio::select! {
                msg = read.next() => {
                    let Some(msg) = msg else {
                        return Ok(SessionEnd::Closed);
                    };
                    match msg.context("WebSocket read failed")? {
                        Message::Text(text) => match classify(text.as_str()) {
                            Frame::Reply(reply) => {
                                deadline = Instant::now() + ping_deadline;
                                write
                                    .send(Message::Text(reply.into()))
                                    .await
                                    .context("Failed to send pong")?;
                            }
                            Frame::Forward(event) => {
                                let _ = event_tx.send(event).await;
                            }
                            Frame::Closed => return Ok(SessionEnd::Closed),
                            Frame::Ignore => {}
                        },
                        Message::Ping(data) => {
                            let _ = write.send(Message::Pong(data)).await;
                        }
                        Message::Close(_) => return Ok(SessionEnd::Closed),
                        _ => {}
                    }
                }
                action = action_rx.recv() => {
                    let Some(action) = action else {
                        return Ok(SessionEnd::Shutdown);
                    };
                    let frame = encode_action(&action)?;
                    debug!(frame = %frame, "Sending action");
                    write
                        .send(Message::Text(frame.into()))
                        .await
                        .context("Failed to send action")?;
                }
                _ = tokio::time::sleep_until(deadline) => {
                    bail!("No ping from server within {}ms", ping_deadline.as_millis());
                }
                _ = shutdown_rx.recv() => {
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(SessionEnd::Shutdown);
                }
            }
        }
    }

    /// Stop the connection task.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
    }
}

enum SessionEnd {
    Closed,
    Shutdown,
}

async fn next_packet(read: &mut WsRead) -> Result<EnginePacket> {
    loop {
        let msg = read
            .next()
            .await
            .context("Connection closed during handshake")?
            .context("WebSocket read failed")?;
        if let Message::Text(text) = msg {
            return EnginePacket::decode(text.as_str()).context("Invalid handshake frame");
        }
    }
}

/// Decide what to do with one text frame.
fn classify(text: &str) -> Frame {
    let packet = match EnginePacket::decode(text) {
        Ok(packet) => packet,
        Err(e) => {
            warn!(error = %e, "Dropping undecodable frame");
            return Frame::Ignore;
        }
    };

    match packet {
        EnginePacket::Ping(data) => Frame::Reply(EnginePacket::Pong(data).encode()),
        EnginePacket::Close => Frame::Closed,
        EnginePacket::Message(SocketPacket::Event { name, data, .. }) => {
            Frame::Forward(TransportEvent::Event { name, data })
        }
        EnginePacket::Message(SocketPacket::Disconnect { .. }) => Frame::Closed,
        EnginePacket::Message(SocketPacket::ConnectError { data, .. }) => {
            Frame::Forward(TransportEvent::Error(format!("Connection error: {data}")))
        }
        _ => Frame::Ignore,
    }
}

/// Encode an outbound event as a `42[...]` frame.
fn encode_action(event: &OutboundEvent) -> Result<String> {
    let payload = event.payload().context("Failed to serialize action")?;
    Ok(EnginePacket::Message(SocketPacket::event(event.name(), payload)).encode())
}

fn ping_deadline(handshake: &Handshake) -> Duration {
    let millis = handshake.ping_interval + handshake.ping_timeout;
    if millis == 0 {
        DEFAULT_PING_DEADLINE
    } else {
        Duration::from_millis(millis)
    }
}

/// Calculate exponential backoff delay.
fn calculate_backoff_delay(attempts: u32) -> u64 {
    std::cmp::min(
        RECONNECT_BASE_DELAY_SECS.saturating_mul(1 << attempts.saturating_sub(1).min(6)),
        MAX_RECONNECT_DELAY_SECS,
    )
}
