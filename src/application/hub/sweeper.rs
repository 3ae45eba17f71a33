//! Lifecycle sweeper - evicts old games to bound memory.
//!
//! Eviction is unconditional and by creation age, regardless of status;
//! participants learn about it only through `NotFound` on their next
//! operation.

use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::GameHub;

impl GameHub {
    /// Starts the periodic sweep. The task runs for the life of the
    /// process.
    pub fn spawn_sweeper(&self) {
        let Some(hub) = self.me.upgrade() else {
            return; // hub is shutting down
        };
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(hub.config.sweep_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let evicted = hub.sweep_expired().await;
                if evicted > 0 {
                    info!(evicted, "swept expired games");
                }
            }
        });
    }

    /// Removes every game whose creation time exceeds the configured
    /// maximum age. Returns the number of evicted games.
    pub(crate) async fn sweep_expired(&self) -> usize {
        let max_age = self.config.session_max_age;
        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|id, entry| {
            let keep = entry.created_at.elapsed() < max_age;
            if !keep {
                debug!(game_id = %id, "evicting expired game");
            }
            keep
        });
        before - games.len()
    }
}
