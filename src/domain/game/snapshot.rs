//! Serializable point-in-time copy of a game session.
//!
//! This is the shape handed to both the transport layer (broadcast
//! frames) and the persistence store. Parsing a serialized snapshot back
//! reconstructs an identical grid, status, and participant set.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GameId, Timestamp};

use super::aggregate::{GameStatus, Outcome};
use super::board::{Board, Slot};
use super::player::Player;

/// Full session state at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: GameId,
    pub board: Board,
    /// Slot 0 then slot 1; slot 1 is `None` while the game is waiting.
    pub players: [Option<Player>; 2],
    pub current_turn: Slot,
    pub status: GameStatus,
    /// Set exactly when status is finished.
    pub winner: Option<Outcome>,
    pub created_at: Timestamp,
    pub last_move_at: Option<Timestamp>,
}

impl GameSnapshot {
    /// Returns the participant in the given slot, if filled.
    pub fn player(&self, slot: Slot) -> Option<&Player> {
        self.players[slot.index()].as_ref()
    }

    /// Display name of the participant in the given slot.
    pub fn username(&self, slot: Slot) -> Option<&str> {
        self.player(slot).map(Player::username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PlayerId;
    use crate::domain::game::Game;

    fn sample() -> GameSnapshot {
        let mut game = Game::new(
            GameId::new(),
            Player::human(PlayerId::new(), "alice"),
        );
        game.join(Player::human(PlayerId::new(), "bob"), Slot::Zero)
            .unwrap();
        game.play(3).unwrap();
        game.play(4).unwrap();
        game.snapshot()
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let snapshot = sample();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, parsed);
    }

    #[test]
    fn waiting_snapshot_has_empty_slot_one() {
        let game = Game::new(
            GameId::new(),
            Player::human(PlayerId::new(), "alice"),
        );
        let snapshot = game.snapshot();
        assert!(snapshot.player(Slot::One).is_none());
        assert_eq!(snapshot.username(Slot::Zero), Some("alice"));

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, parsed);
    }

    #[test]
    fn wire_fields_use_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("currentTurn").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("lastMoveAt").is_some());
    }
}
