//! Wire message types and inbound validation
//!
//! Messages are tagged sum types matched exhaustively; the envelope adds a
//! protocol version discriminant. Anything malformed - bad JSON, wrong
//! version, unknown tag, non-finite numerics - parses to `None` and is
//! dropped silently. The actual transport (sockets, framing, backpressure)
//! lives outside this crate.

use serde::{Deserialize, Serialize};

use crate::sim::{FoodsBatch, StateSnapshot};

pub const PROTOCOL_VERSION: u8 = 1;

/// Version envelope wrapped around every message on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope<T> {
    v: u8,
    #[serde(flatten)]
    msg: T,
}

/// Client -> server intents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Create or replace the sender's snake
    Join { name: String },
    /// Set the snake's desired heading
    Move { angle: f32 },
    /// Toggle boost
    Boost { active: bool },
}

/// Server -> client messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Confirms a join/respawn with the assigned ids
    JoinAck {
        player_id: u32,
        snake_id: u32,
        eliminations: u32,
    },
    /// Full snapshot, sent every tick
    State(StateSnapshot),
    /// Reduced-cadence food-only batch
    Foods(FoodsBatch),
    /// The recipient's snake has died
    Dead {
        #[serde(skip_serializing_if = "Option::is_none")]
        killer_id: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        killer_name: Option<String>,
    },
    /// Kill-count update for a killer
    Stats { eliminations: u32 },
}

/// Decode and validate an inbound client payload. Returns `None` for
/// anything that should not reach the simulation.
pub fn parse_client_message(raw: &[u8]) -> Option<ClientMessage> {
    let envelope: Envelope<ClientMessage> = serde_json::from_slice(raw).ok()?;
    if envelope.v != PROTOCOL_VERSION {
        return None;
    }
    match &envelope.msg {
        // NaN/Infinity must never propagate into simulation state
        ClientMessage::Move { angle } if !angle.is_finite() => None,
        _ => Some(envelope.msg),
    }
}

/// Encode an outbound message with the version envelope
pub fn serialize_server_message(msg: &ServerMessage) -> Vec<u8> {
    let envelope = Envelope {
        v: PROTOCOL_VERSION,
        msg,
    };
    // Message types contain nothing serde_json can reject
    serde_json::to_vec(&envelope).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join() {
        let msg = parse_client_message(br#"{"v":1,"type":"join","name":"alpha"}"#);
        assert_eq!(
            msg,
            Some(ClientMessage::Join {
                name: "alpha".into()
            })
        );
    }

    #[test]
    fn test_parse_move_and_boost() {
        let msg = parse_client_message(br#"{"v":1,"type":"move","angle":1.5}"#);
        assert_eq!(msg, Some(ClientMessage::Move { angle: 1.5 }));

        let msg = parse_client_message(br#"{"v":1,"type":"boost","active":true}"#);
        assert_eq!(msg, Some(ClientMessage::Boost { active: true }));
    }

    #[test]
    fn test_reject_wrong_version() {
        assert_eq!(
            parse_client_message(br#"{"v":2,"type":"move","angle":1.0}"#),
            None
        );
        assert_eq!(parse_client_message(br#"{"type":"move","angle":1.0}"#), None);
    }

    #[test]
    fn test_reject_unknown_type_and_garbage() {
        assert_eq!(
            parse_client_message(br#"{"v":1,"type":"teleport","x":0}"#),
            None
        );
        assert_eq!(parse_client_message(b"not json"), None);
        assert_eq!(parse_client_message(b""), None);
    }

    #[test]
    fn test_reject_non_finite_angle() {
        // 1e999 overflows f32/f64; either the parser refuses it or the
        // finiteness guard catches the resulting infinity.
        assert_eq!(
            parse_client_message(br#"{"v":1,"type":"move","angle":1e999}"#),
            None
        );
    }

    #[test]
    fn test_server_message_envelope_and_tags() {
        let msg = ServerMessage::JoinAck {
            player_id: 3,
            snake_id: 9,
            eliminations: 0,
        };
        let bytes = serialize_server_message(&msg);
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["v"], 1);
        assert_eq!(value["type"], "join_ack");
        assert_eq!(value["playerId"], 3);
        assert_eq!(value["snakeId"], 9);
    }

    #[test]
    fn test_dead_message_omits_missing_killer() {
        let msg = ServerMessage::Dead {
            killer_id: None,
            killer_name: None,
        };
        let bytes = serialize_server_message(&msg);
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["type"], "dead");
        assert!(value.get("killerId").is_none());

        let msg = ServerMessage::Dead {
            killer_id: Some(7),
            killer_name: Some("rex".into()),
        };
        let value: serde_json::Value =
            serde_json::from_slice(&serialize_server_message(&msg)).unwrap();
        assert_eq!(value["killerId"], 7);
        assert_eq!(value["killerName"], "rex");
    }

    #[test]
    fn test_state_message_roundtrip() {
        let msg = ServerMessage::State(StateSnapshot {
            time: 100.0,
            snakes: vec![],
            foods: vec![],
        });
        let bytes = serialize_server_message(&msg);
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["type"], "state");
        assert_eq!(value["time"], 100.0);
    }
}
