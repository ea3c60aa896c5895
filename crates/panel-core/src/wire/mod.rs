//! Socket.IO (v5) over Engine.IO (v4) text framing.
//!
//! Only the WebSocket transport and text frames are handled:
//!
//! ```text
//! 0{"sid":..,"pingInterval":..}   engine open (server → client)
//! 2 / 3                           engine ping / pong
//! 40                              socket connect to "/"
//! 42["system_status",{...}]       socket event
//! 44{"message":"..."}             socket connect error
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WireError;

const DEFAULT_NAMESPACE: &str = "/";

/// Engine.IO open handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload: Option<u64>,
}

/// Engine.IO packet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(SocketPacket),
    Upgrade,
    Noop,
}

/// Socket.IO packet carried inside an engine message.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        data: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        id: Option<u64>,
        name: String,
        /// First argument after the name; `Null` when absent.
        data: Value,
    },
    Ack {
        namespace: String,
        id: Option<u64>,
        data: Value,
    },
    ConnectError {
        namespace: String,
        data: Value,
    },
}

impl SocketPacket {
    /// Event on the default namespace without an ack id.
    pub fn event(name: impl Into<String>, data: Value) -> Self {
        SocketPacket::Event {
            namespace: DEFAULT_NAMESPACE.to_string(),
            id: None,
            name: name.into(),
            data,
        }
    }

    /// Connect to the default namespace.
    pub fn connect() -> Self {
        SocketPacket::Connect {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data: None,
        }
    }
}

impl EnginePacket {
    /// Decode one text frame.
    pub fn decode(frame: &str) -> Result<Self, WireError> {
        let kind = frame.chars().next().ok_or(WireError::Empty)?;
        let body = &frame[kind.len_utf8()..];

        match kind {
            '0' => serde_json::from_str(body)
                .map(EnginePacket::Open)
                .map_err(|e| WireError::InvalidJson(e.to_string())),
            '1' => Ok(EnginePacket::Close),
            '2' => Ok(EnginePacket::Ping(body.to_string())),
            '3' => Ok(EnginePacket::Pong(body.to_string())),
            '4' => decode_socket(body).map(EnginePacket::Message),
            '5' => Ok(EnginePacket::Upgrade),
            '6' => Ok(EnginePacket::Noop),
            other => Err(WireError::UnknownEnginePacket(other)),
        }
    }

    /// Encode as one text frame.
    pub fn encode(&self) -> String {
        match self {
            EnginePacket::Open(handshake) => {
                let json = serde_json::to_value(handshake).unwrap_or(Value::Null);
                format!("0{json}")
            }
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(data) => format!("2{data}"),
            EnginePacket::Pong(data) => format!("3{data}"),
            EnginePacket::Message(packet) => format!("4{}", encode_socket(packet)),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        }
    }
}

fn decode_socket(body: &str) -> Result<SocketPacket, WireError> {
    let kind = body.chars().next().ok_or(WireError::Empty)?;
    let mut rest = &body[kind.len_utf8()..];

    if matches!(kind, '5' | '6') {
        return Err(WireError::BinaryUnsupported);
    }

    let namespace = if rest.starts_with('/') {
        let end = rest.find(',').unwrap_or(rest.len());
        let ns = rest[..end].to_string();
        rest = rest.get(end + 1..).unwrap_or("");
        ns
    } else {
        DEFAULT_NAMESPACE.to_string()
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let id = rest[..digits].parse::<u64>().ok();
    rest = &rest[digits..];

    let json = if rest.is_empty() {
        None
    } else {
        Some(serde_json::from_str::<Value>(rest).map_err(|e| WireError::InvalidJson(e.to_string()))?)
    };

    match kind {
        '0' => Ok(SocketPacket::Connect { namespace, data: json }),
        '1' => Ok(SocketPacket::Disconnect { namespace }),
        '2' => {
            let Some(Value::Array(args)) = json else {
                return Err(WireError::MissingEventName);
            };
            let mut args = args.into_iter();
            let Some(Value::String(name)) = args.next() else {
                return Err(WireError::MissingEventName);
            };
            Ok(SocketPacket::Event {
                namespace,
                id,
                name,
                data: args.next().unwrap_or(Value::Null),
            })
        }
        '3' => Ok(SocketPacket::Ack {
            namespace,
            id,
            data: json.unwrap_or(Value::Null),
        }),
        '4' => Ok(SocketPacket::ConnectError {
            namespace,
            data: json.unwrap_or(Value::Null),
        }),
        other => Err(WireError::UnknownSocketPacket(other)),
    }
}

fn encode_socket(packet: &SocketPacket) -> String {
    fn prefix(kind: char, namespace: &str, id: Option<u64>) -> String {
        let mut out = String::from(kind);
        if namespace != DEFAULT_NAMESPACE {
            out.push_str(namespace);
            out.push(',');
        }
        if let Some(id) = id {
            out.push_str(&id.to_string());
        }
        out
    }

    match packet {
        SocketPacket::Connect { namespace, data } => {
            let mut out = prefix('0', namespace, None);
            if let Some(data) = data {
                out.push_str(&data.to_string());
            }
            out
        }
        SocketPacket::Disconnect { namespace } => prefix('1', namespace, None),
        SocketPacket::Event {
            namespace,
            id,
            name,
            data,
        } => {
            let args = Value::Array(vec![Value::String(name.clone()), data.clone()]);
            format!("{}{}", prefix('2', namespace, *id), args)
        }
        SocketPacket::Ack {
            namespace,
            id,
            data,
        } => {
            let args = Value::Array(vec![data.clone()]);
            format!("{}{}", prefix('3', namespace, *id), args)
        }
        SocketPacket::ConnectError { namespace, data } => {
            format!("{}{}", prefix('4', namespace, None), data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_open() {
        let frame = r#"0{"sid":"lv_VI97HAXpY6yYWAAAC","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;
        let EnginePacket::Open(handshake) = EnginePacket::decode(frame).unwrap() else {
            panic!("expected open");
        };
        assert_eq!(handshake.sid, "lv_VI97HAXpY6yYWAAAC");
        assert_eq!(handshake.ping_interval, 25_000);
        assert_eq!(handshake.max_payload, Some(1_000_000));
    }

    #[test]
    fn test_decode_ping() {
        assert_eq!(
            EnginePacket::decode("2").unwrap(),
            EnginePacket::Ping(String::new())
        );
    }

    #[test]
    fn test_decode_event() {
        let frame = r#"42["ssh_key",{"key":"ssh-ed25519 AAAA user@host"}]"#;
        assert_eq!(
            EnginePacket::decode(frame).unwrap(),
            EnginePacket::Message(SocketPacket::event(
                "ssh_key",
                json!({"key": "ssh-ed25519 AAAA user@host"})
            ))
        );
    }

    #[test]
    fn test_decode_event_with_namespace_and_ack() {
        let frame = r#"42/admin,7["log",{"message":"hi"}]"#;
        let EnginePacket::Message(SocketPacket::Event { namespace, id, name, .. }) =
            EnginePacket::decode(frame).unwrap()
        else {
            panic!("expected event");
        };
        assert_eq!(namespace, "/admin");
        assert_eq!(id, Some(7));
        assert_eq!(name, "log");
    }

    #[test]
    fn test_decode_event_without_data() {
        let packet = EnginePacket::decode(r#"42["git_projects"]"#).unwrap();
        assert!(matches!(
            packet,
            EnginePacket::Message(SocketPacket::Event { data: Value::Null, .. })
        ));
    }

    #[test]
    fn test_decode_connect_ack() {
        let packet = EnginePacket::decode(r#"40{"sid":"abc"}"#).unwrap();
        assert_eq!(
            packet,
            EnginePacket::Message(SocketPacket::Connect {
                namespace: "/".to_string(),
                data: Some(json!({"sid": "abc"})),
            })
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(EnginePacket::decode(""), Err(WireError::Empty));
        assert_eq!(EnginePacket::decode("9"), Err(WireError::UnknownEnginePacket('9')));
        assert_eq!(EnginePacket::decode("42[]"), Err(WireError::MissingEventName));
        assert_eq!(EnginePacket::decode("42[1,2]"), Err(WireError::MissingEventName));
        assert_eq!(EnginePacket::decode("451-[\"x\"]"), Err(WireError::BinaryUnsupported));
        assert!(matches!(EnginePacket::decode("42[oops"), Err(WireError::InvalidJson(_))));
    }

    #[test]
    fn test_encode_client_frames() {
        assert_eq!(EnginePacket::Message(SocketPacket::connect()).encode(), "40");
        assert_eq!(EnginePacket::Pong(String::new()).encode(), "3");
        assert_eq!(
            EnginePacket::Message(SocketPacket::event("action", json!({"type": "enable_ssh"})))
                .encode(),
            r#"42["action",{"type":"enable_ssh"}]"#
        );
    }
}
