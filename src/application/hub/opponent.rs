//! Opponent trigger - drives the automated participant's turns.
//!
//! Scheduled after the join-timeout fallback, after a human move that
//! hands the bot the turn, and defensively after an automated move that
//! somehow retains it. Re-expressed as a bounded loop rather than a task
//! that re-spawns itself, with an explicit exit once the turn leaves the
//! automated participant.

use tracing::{debug, warn};

use crate::domain::foundation::GameId;
use crate::domain::game::GameStatus;

use super::fanout::HubMessage;
use super::GameHub;

/// Hard cap on consecutive automated moves in one scheduled run. A
/// correct engine hands the turn back after a single move; anything past
/// that is a surfaced defect, bounded at one full board worth of pieces.
const MAX_CONSECUTIVE_BOT_MOVES: usize = 42;

impl GameHub {
    /// Schedules the automated participant to take its turn.
    pub(crate) fn spawn_opponent(&self, id: GameId) {
        let Some(hub) = self.me.upgrade() else {
            return; // hub is shutting down
        };
        tokio::spawn(async move { hub.drive_automated_turns(id).await });
    }

    async fn drive_automated_turns(&self, id: GameId) {
        for _ in 0..MAX_CONSECUTIVE_BOT_MOVES {
            tokio::time::sleep(self.config.bot_move_delay).await;

            let Some(entry) = self.game(id).await else {
                debug!(game_id = %id, "game gone before the automated move");
                return;
            };
            let mut game = entry.lock().await;

            // The delay has no cancellation: re-check everything under the
            // session mutex and no-op when the move is no longer needed.
            if game.status() != GameStatus::Active {
                return;
            }
            if !game.current_player().map_or(false, |p| p.is_bot()) {
                return;
            }

            let own = game.turn();
            let column = self
                .chooser
                .choose_column(game.board(), own)
                .filter(|&col| game.board().is_column_open(col))
                .or_else(|| {
                    // A well-formed board with open columns must never be
                    // reported unplayable; scan left to right.
                    game.board().open_columns().first().copied()
                });
            let Some(column) = column else {
                warn!(game_id = %id, "no playable column for the automated turn");
                return;
            };

            match game.play(column) {
                Ok(played) => {
                    debug!(
                        game_id = %id,
                        column = played.column,
                        row = played.row,
                        "automated move applied"
                    );
                    let snapshot = game.snapshot();
                    self.broadcast(&HubMessage::game_update(snapshot.clone())).await;

                    if game.status() == GameStatus::Finished {
                        self.persist_finished(&snapshot);
                        return;
                    }
                    if !game.current_player().map_or(false, |p| p.is_bot()) {
                        return;
                    }
                    warn!(game_id = %id, "automated participant retained the turn");
                }
                Err(err) => {
                    warn!(game_id = %id, error = %err, "automated move rejected");
                    return;
                }
            }
        }
        warn!(game_id = %id, "automated move cap reached, leaving the session");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGameStore;
    use crate::domain::foundation::PlayerId;
    use crate::domain::game::{Board, Player, Slot};
    use crate::ports::MoveChooser;
    use crate::application::hub::HubConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use std::time::Duration;

    /// A broken collaborator that never finds a move.
    struct Stumped;

    impl MoveChooser for Stumped {
        fn choose_column(&self, _board: &Board, _own: Slot) -> Option<usize> {
            None
        }
    }

    /// A broken collaborator that suggests an out-of-range column.
    struct OffTheBoard;

    impl MoveChooser for OffTheBoard {
        fn choose_column(&self, _board: &Board, _own: Slot) -> Option<usize> {
            Some(99)
        }
    }

    fn hub_with(chooser: Arc<dyn MoveChooser>) -> Arc<GameHub> {
        GameHub::new(
            chooser,
            Arc::new(InMemoryGameStore::new()),
            StdRng::seed_from_u64(7),
            HubConfig {
                join_timeout: Duration::from_millis(10),
                bot_move_delay: Duration::from_millis(5),
                ..HubConfig::default()
            },
        )
    }

    async fn wait_for_bot_piece(hub: &Arc<GameHub>, id: GameId) -> bool {
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let Some(entry) = hub.game(id).await else {
                return false;
            };
            let game = entry.lock().await;
            let bot_slot = if game.player(Slot::One).map_or(false, |p| p.is_bot()) {
                Slot::One
            } else {
                continue;
            };
            let bot_pieces = game
                .board()
                .rows()
                .iter()
                .flatten()
                .filter(|&&c| c == Some(bot_slot))
                .count();
            if bot_pieces > 0 {
                return true;
            }
        }
        false
    }

    #[tokio::test]
    async fn stumped_chooser_falls_back_to_an_open_column() {
        let hub = hub_with(Arc::new(Stumped));
        let a = PlayerId::new();
        let created = hub.create_game(Player::human(a, "alice")).await;

        // Give the human a piece so the bot always has a turn eventually.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = hub.submit_move(created.id, a, 6).await;

        assert!(wait_for_bot_piece(&hub, created.id).await);
    }

    #[tokio::test]
    async fn invalid_chooser_suggestion_is_replaced() {
        let hub = hub_with(Arc::new(OffTheBoard));
        let a = PlayerId::new();
        let created = hub.create_game(Player::human(a, "alice")).await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = hub.submit_move(created.id, a, 6).await;

        assert!(wait_for_bot_piece(&hub, created.id).await);
    }
}
