//! Inbound wire messages.
//!
//! Outbound frames ([`HubMessage`](crate::application::hub::HubMessage))
//! are produced and serialized by the hub itself; this module only parses
//! what clients send.

use serde::Deserialize;

use crate::domain::foundation::{GameId, PlayerId};

/// Messages a client may send over the socket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Drop a piece into a column.
    MakeMove(MakeMovePayload),
}

/// Payload of a move request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeMovePayload {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub column: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_move_frame() {
        let frame = r#"{
            "type": "make_move",
            "content": {
                "gameId": "6f2f5a34-9a1b-4f5e-8a3c-2b1d0e9f8a7b",
                "playerId": "11111111-2222-3333-4444-555555555555",
                "column": 3
            }
        }"#;
        let ClientMessage::MakeMove(payload) = serde_json::from_str(frame).unwrap();
        assert_eq!(payload.column, 3);
    }

    #[test]
    fn rejects_unknown_message_types() {
        let frame = r#"{"type": "spectate", "content": {}}"#;
        assert!(serde_json::from_str::<ClientMessage>(frame).is_err());
    }

    #[test]
    fn rejects_negative_columns() {
        let frame = r#"{
            "type": "make_move",
            "content": {
                "gameId": "6f2f5a34-9a1b-4f5e-8a3c-2b1d0e9f8a7b",
                "playerId": "11111111-2222-3333-4444-555555555555",
                "column": -1
            }
        }"#;
        assert!(serde_json::from_str::<ClientMessage>(frame).is_err());
    }
}
