//! Participant record embedded in a game slot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PlayerId;

/// Display name used for every automated opponent.
pub const BOT_USERNAME: &str = "CompetitiveBot";

/// One participant in a game: identity, display name, and whether the
/// moves come from the automated opponent.
///
/// Created at session-create or session-join time and immutable after.
/// A participant record is embedded by value in exactly one game slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    id: PlayerId,
    username: String,
    is_bot: bool,
}

impl Player {
    /// Creates a human participant.
    pub fn human(id: PlayerId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            is_bot: false,
        }
    }

    /// Creates an automated participant with a fresh identity.
    pub fn bot() -> Self {
        Self {
            id: PlayerId::new(),
            username: BOT_USERNAME.to_string(),
            is_bot: true,
        }
    }

    /// Returns the participant id.
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Returns the display name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether this participant's moves are computed by the opponent
    /// collaborator.
    pub fn is_bot(&self) -> bool {
        self.is_bot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_keeps_given_identity() {
        let id = PlayerId::new();
        let player = Player::human(id, "alice");
        assert_eq!(player.id(), &id);
        assert_eq!(player.username(), "alice");
        assert!(!player.is_bot());
    }

    #[test]
    fn bot_gets_fresh_identity_and_fixed_name() {
        let a = Player::bot();
        let b = Player::bot();
        assert!(a.is_bot());
        assert_eq!(a.username(), BOT_USERNAME);
        assert_ne!(a.id(), b.id());
    }
}
