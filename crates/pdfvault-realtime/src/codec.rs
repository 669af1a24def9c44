//! Socket.IO packet encoding for realtime events.
//!
//! Over the WebSocket transport each text frame carries one Engine.IO v4
//! packet: a type digit followed by its payload. Socket.IO packets travel
//! inside Engine.IO message packets (`4`), so an event on the default
//! namespace reads `42["folder:updated",{...}]`.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use pdfvault_core::AppResult;
use pdfvault_core::error::{AppError, ErrorKind};
use pdfvault_core::events::RealtimeEvent;

/// Engine.IO pong, sent in answer to every server ping.
pub const PONG: &str = "3";
/// Socket.IO disconnect from the default namespace.
pub const DISCONNECT: &str = "41";

/// Handshake sent by the server when the transport opens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    /// Engine.IO session id.
    pub sid: String,
    /// Milliseconds between server pings.
    #[serde(default = "default_ping_interval")]
    pub ping_interval: u64,
    /// Milliseconds the server waits for a pong.
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout: u64,
}

impl Handshake {
    /// How long the link may stay silent before it is considered dead.
    pub fn liveness(&self) -> Duration {
        Duration::from_millis(self.ping_interval.saturating_add(self.ping_timeout))
    }
}

fn default_ping_interval() -> u64 {
    25_000
}

fn default_ping_timeout() -> u64 {
    20_000
}

/// A decoded inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Transport opened.
    Open(Handshake),
    /// Transport closed by the server.
    Close,
    /// Server heartbeat.
    Ping,
    /// Heartbeat answer.
    Pong,
    /// Default namespace joined.
    Connected,
    /// Namespace join refused, with the server's reason.
    ConnectError(String),
    /// Server left the namespace.
    Disconnect,
    /// Application event.
    Event(RealtimeEvent),
    /// Acks, binary attachments, noop and upgrade packets, other namespaces.
    Ignored,
}

/// Namespace connect packet, carrying the token as the auth payload.
pub fn encode_connect(token: Option<&str>) -> String {
    match token.filter(|t| !t.is_empty()) {
        Some(token) => format!("40{}", json!({ "token": token })),
        None => "40".to_string(),
    }
}

/// Encode an event as `42["name",data]`.
pub fn encode_event(event: &RealtimeEvent) -> AppResult<String> {
    let args = serde_json::to_string(&(&event.event, &event.data))?;
    Ok(format!("42{args}"))
}

/// Decode one text frame.
pub fn decode_packet(text: &str) -> AppResult<Packet> {
    let (kind, body) = split_type(text)?;
    Ok(match kind {
        '0' => Packet::Open(serde_json::from_str(body)?),
        '1' => Packet::Close,
        '2' => Packet::Ping,
        '3' => Packet::Pong,
        '4' => decode_message(body)?,
        _ => Packet::Ignored,
    })
}

fn decode_message(body: &str) -> AppResult<Packet> {
    let (kind, rest) = split_type(body)?;
    // Packets for a non-default namespace start with "/name,".
    if rest.starts_with('/') {
        return Ok(Packet::Ignored);
    }
    Ok(match kind {
        '0' => Packet::Connected,
        '1' => Packet::Disconnect,
        '2' => Packet::Event(decode_event(rest)?),
        '4' => Packet::ConnectError(connect_error_reason(rest)),
        _ => Packet::Ignored,
    })
}

fn decode_event(rest: &str) -> AppResult<RealtimeEvent> {
    // An optional ack id precedes the argument array.
    let args = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    let mut args: Vec<Value> = serde_json::from_str(args)?;
    if args.is_empty() {
        return Err(malformed("event packet without a name"));
    }
    let event = match args.remove(0) {
        Value::String(name) => name,
        other => return Err(malformed(&format!("event name is not a string: {other}"))),
    };
    let data = if args.is_empty() {
        Value::Null
    } else {
        args.swap_remove(0)
    };
    Ok(RealtimeEvent { event, data })
}

fn connect_error_reason(rest: &str) -> String {
    match serde_json::from_str::<Value>(rest) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("connection refused")
            .to_string(),
        Ok(Value::String(reason)) => reason,
        _ if !rest.trim().is_empty() => rest.trim().to_string(),
        _ => "connection refused".to_string(),
    }
}

fn split_type(text: &str) -> AppResult<(char, &str)> {
    let mut chars = text.chars();
    match chars.next() {
        Some(kind) if kind.is_ascii_digit() => Ok((kind, chars.as_str())),
        _ => Err(malformed(&format!("unknown packet '{text}'"))),
    }
}

fn malformed(detail: &str) -> AppError {
    AppError::new(
        ErrorKind::Serialization,
        format!("Malformed realtime frame: {detail}"),
    )
}

#[cfg(test)]
mod tests {
    use pdfvault_core::events::EventName;

    use super::*;

    #[test]
    fn test_decode_handshake() {
        let packet = decode_packet(
            r#"0{"sid":"lv_VI97HAXpY6yYWAAAC","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#,
        )
        .unwrap();
        let Packet::Open(handshake) = packet else {
            panic!("expected open, got {packet:?}");
        };
        assert_eq!(handshake.sid, "lv_VI97HAXpY6yYWAAAC");
        assert_eq!(handshake.liveness(), Duration::from_secs(45));
    }

    #[test]
    fn test_decode_server_event() {
        let packet =
            decode_packet(r#"42["folder:updated",{"folderId":"f1","action":"updated"}]"#).unwrap();
        let Packet::Event(event) = packet else {
            panic!("expected event, got {packet:?}");
        };
        assert!(event.is(EventName::FolderUpdated));
        assert_eq!(event.data["folderId"], "f1");

        // Unknown names are kept, a missing argument becomes null.
        let packet = decode_packet(r#"42["server:notice"]"#).unwrap();
        assert_eq!(
            packet,
            Packet::Event(RealtimeEvent {
                event: "server:notice".to_string(),
                data: Value::Null,
            })
        );
    }

    #[test]
    fn test_decode_control_packets() {
        assert_eq!(decode_packet("2").unwrap(), Packet::Ping);
        assert_eq!(decode_packet("1").unwrap(), Packet::Close);
        assert_eq!(decode_packet(r#"40{"sid":"x"}"#).unwrap(), Packet::Connected);
        assert_eq!(decode_packet("41").unwrap(), Packet::Disconnect);
        assert_eq!(
            decode_packet(r#"44{"message":"Not authorized"}"#).unwrap(),
            Packet::ConnectError("Not authorized".to_string())
        );
        assert_eq!(decode_packet("6").unwrap(), Packet::Ignored);
        assert_eq!(
            decode_packet(r#"42/admin,["folder:updated",{}]"#).unwrap(),
            Packet::Ignored
        );
        assert_eq!(decode_packet("431[]").unwrap(), Packet::Ignored);
    }

    #[test]
    fn test_malformed_frame() {
        let err = decode_packet("not a packet").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
        let err = decode_packet("42{}").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
        let err = decode_packet("42[]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
        assert!(decode_packet("").is_err());
    }

    #[test]
    fn test_encode() {
        let frame = encode_event(&RealtimeEvent::new(
            EventName::AdminPdfUpdate,
            json!({"id": "p1"}),
        ))
        .unwrap();
        assert_eq!(frame, r#"42["admin:pdf:update",{"id":"p1"}]"#);

        assert_eq!(encode_connect(None), "40");
        assert_eq!(encode_connect(Some("")), "40");
        assert_eq!(encode_connect(Some("t")), r#"40{"token":"t"}"#);
    }
}
