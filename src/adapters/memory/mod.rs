//! In-memory GameStore.
//!
//! Backs tests and store-less operation: when no database is configured
//! (or the connection fails at startup) the service still runs, keeping
//! finished games and tallies for the lifetime of the process.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::game::GameSnapshot;
use crate::ports::{GameStore, LeaderboardEntry, StoreError};

/// Process-local implementation of [`GameStore`]. Never fails.
#[derive(Default)]
pub struct InMemoryGameStore {
    finished: Mutex<Vec<GameSnapshot>>,
    tallies: Mutex<HashMap<String, LeaderboardEntry>>,
}

impl InMemoryGameStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots archived so far (test inspection).
    pub fn finished_games(&self) -> Vec<GameSnapshot> {
        self.finished.lock().expect("store lock poisoned").clone()
    }

    fn bump(&self, username: &str, wins: i64, losses: i64, draws: i64) {
        let mut tallies = self.tallies.lock().expect("store lock poisoned");
        let entry = tallies
            .entry(username.to_string())
            .or_insert_with(|| LeaderboardEntry {
                username: username.to_string(),
                wins: 0,
                losses: 0,
                draws: 0,
            });
        entry.wins += wins;
        entry.losses += losses;
        entry.draws += draws;
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn save_finished_game(&self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        self.finished
            .lock()
            .expect("store lock poisoned")
            .push(snapshot.clone());
        Ok(())
    }

    async fn record_outcome(
        &self,
        winner: Option<String>,
        loser: Option<String>,
        is_draw: bool,
    ) -> Result<(), StoreError> {
        if is_draw {
            for name in [winner, loser].into_iter().flatten() {
                self.bump(&name, 0, 0, 1);
            }
        } else {
            if let Some(name) = winner {
                self.bump(&name, 1, 0, 0);
            }
            if let Some(name) = loser {
                self.bump(&name, 0, 1, 0);
            }
        }
        Ok(())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut entries: Vec<LeaderboardEntry> = self
            .tallies
            .lock()
            .expect("store lock poisoned")
            .values()
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then(b.draws.cmp(&a.draws))
                .then(a.losses.cmp(&b.losses))
                .then(a.username.cmp(&b.username))
        });
        entries.truncate(100);
        Ok(entries)
    }
}
