//! GameStore port - persistence of finished games and win/loss tallies.
//!
//! The store is an auxiliary record, not the source of truth: the hub
//! keeps playing when a save fails, logging a warning instead of rolling
//! back in-memory state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::game::GameSnapshot;

/// Errors from the persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection failure.
    #[error("database error: {0}")]
    Database(String),

    /// The store is not reachable at all.
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub wins: i64,
    pub losses: i64,
    pub draws: i64,
}

/// Port for recording finished games and querying standings.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Archives a finished game.
    async fn save_finished_game(&self, snapshot: &GameSnapshot) -> Result<(), StoreError>;

    /// Updates the per-player tallies for one finished game.
    ///
    /// With `is_draw` false, `winner` gains a win and `loser` a loss.
    /// With `is_draw` true, both named participants gain a draw. A `None`
    /// name skips that side (the hub omits automated losers).
    async fn record_outcome(
        &self,
        winner: Option<String>,
        loser: Option<String>,
        is_draw: bool,
    ) -> Result<(), StoreError>;

    /// Standings ordered by wins desc, draws desc, losses asc, capped at
    /// 100 entries.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn GameStore) {}
    }
}
