//! Session hub - creates, tracks, and concurrently mutates live games.
//!
//! The hub owns two collections: the set of live games and the set of
//! connected handles. Each game sits behind its own async mutex so that
//! moves, joins, and timer callbacks for the *same* game never interleave,
//! while distinct games progress fully in parallel. The collections
//! themselves are guarded by `RwLock`s; lookups clone the per-game `Arc`
//! and release the collection lock before touching the game.
//!
//! # Ordering
//!
//! Every accepted state transition broadcasts its snapshot *before* the
//! session mutex is released, so observers see transitions in the single
//! total order in which they were applied.
//!
//! # Lock order
//!
//! collection read/write → session mutex → handles read/write. Nothing
//! acquires a session mutex while holding the handles lock, and nothing
//! re-enters the games lock while holding a session mutex.

mod fanout;
mod opponent;
mod sweeper;

pub use fanout::HubMessage;

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, Weak};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::domain::foundation::{GameId, HandleId, PlayerId, Timestamp};
use crate::domain::game::{Game, GameError, GameSnapshot, GameStatus, Outcome, Player, Slot};
use crate::ports::{GameStore, MoveChooser};

/// Tuning knobs for the hub's timers and queues.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// How long a created game waits for a human opponent before the bot
    /// is seated.
    pub join_timeout: Duration,
    /// Artificial delay before each automated move (perceived-latency
    /// smoothing, not a correctness requirement).
    pub bot_move_delay: Duration,
    /// Interval between sweeper passes.
    pub sweep_interval: Duration,
    /// Games older than this are evicted regardless of status.
    pub session_max_age: Duration,
    /// Bound of each handle's outbound queue.
    pub outbound_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            join_timeout: Duration::from_secs(10),
            bot_move_delay: Duration::from_secs(1),
            sweep_interval: Duration::from_secs(60),
            session_max_age: Duration::from_secs(3600),
            outbound_capacity: 256,
        }
    }
}

/// Registry record of one live connection.
///
/// Lifetime bounded by the underlying connection; removing the record
/// drops the only sender and thereby closes the delivery channel.
struct ConnectedHandle {
    player_id: PlayerId,
    game_id: GameId,
    outbound: mpsc::Sender<String>,
}

/// Map entry for one live game.
///
/// Creation time is duplicated here so the sweeper can age-check entries
/// without contending on the per-game mutex.
struct GameEntry {
    created_at: Timestamp,
    game: Arc<Mutex<Game>>,
}

/// The session registry.
pub struct GameHub {
    games: RwLock<HashMap<GameId, GameEntry>>,
    handles: RwLock<HashMap<HandleId, ConnectedHandle>>,
    chooser: Arc<dyn MoveChooser>,
    store: Arc<dyn GameStore>,
    /// Explicitly passed random source, seeded once at process start.
    rng: StdMutex<StdRng>,
    config: HubConfig,
    /// Self-handle for the timer and opponent tasks the hub spawns.
    me: Weak<GameHub>,
}

impl GameHub {
    /// Creates the hub. Returned behind an `Arc` because the join
    /// timeout, opponent, and sweeper tasks each hold a clone.
    pub fn new(
        chooser: Arc<dyn MoveChooser>,
        store: Arc<dyn GameStore>,
        rng: StdRng,
        config: HubConfig,
    ) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            games: RwLock::new(HashMap::new()),
            handles: RwLock::new(HashMap::new()),
            chooser,
            store,
            rng: StdMutex::new(rng),
            config,
            me: me.clone(),
        })
    }

    // ─────────────────────────────────────────────────────────────────
    // Game operations
    // ─────────────────────────────────────────────────────────────────

    /// Allocates a waiting game with `creator` in slot 0 and schedules
    /// the one-shot join timeout.
    pub async fn create_game(&self, creator: Player) -> GameSnapshot {
        let id = GameId::new();
        let game = Game::new(id, creator);
        let snapshot = game.snapshot();

        self.games.write().await.insert(
            id,
            GameEntry {
                created_at: game.created_at(),
                game: Arc::new(Mutex::new(game)),
            },
        );

        info!(
            game_id = %id,
            player = %snapshot.username(Slot::Zero).unwrap_or_default(),
            "game created"
        );
        self.spawn_join_timeout(id);
        snapshot
    }

    /// Fills slot 1, activates the game with a randomly selected starting
    /// turn, and broadcasts the new state. Schedules an automated move
    /// when the selected starter is the bot.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such game is tracked
    /// - `AlreadyStarted` if slot 1 is already filled
    pub async fn join_game(&self, id: GameId, player: Player) -> Result<GameSnapshot, GameError> {
        let entry = self.game(id).await.ok_or(GameError::NotFound(id))?;
        let mut game = entry.lock().await;

        let joiner = player.username().to_owned();
        game.join(player, self.random_slot())?;
        let snapshot = game.snapshot();
        info!(game_id = %id, player = %joiner, starting = %game.turn(), "game activated");

        self.broadcast(&HubMessage::game_update(snapshot.clone())).await;

        let bot_starts = game.current_player().map_or(false, |p| p.is_bot());
        drop(game);
        if bot_starts {
            self.spawn_opponent(id);
        }
        Ok(snapshot)
    }

    /// Applies one move on behalf of `player_id`, broadcasts the result,
    /// persists terminal states, and schedules the automated opponent
    /// when the turn passes to it.
    ///
    /// Turn ownership is confirmed by participant identity, not by slot
    /// position.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such game is tracked
    /// - `NotYourTurn` if `player_id` does not hold the turn
    /// - board-engine errors from the placement itself
    pub async fn submit_move(
        &self,
        id: GameId,
        player_id: PlayerId,
        column: usize,
    ) -> Result<GameSnapshot, GameError> {
        let entry = self.game(id).await.ok_or(GameError::NotFound(id))?;
        let mut game = entry.lock().await;

        if !game.is_turn_of(&player_id) {
            return Err(GameError::NotYourTurn);
        }

        let played = game.play(column)?;
        debug!(game_id = %id, column = played.column, row = played.row, "move applied");

        let snapshot = game.snapshot();
        self.broadcast(&HubMessage::game_update(snapshot.clone())).await;

        let finished = game.status() == GameStatus::Finished;
        if finished {
            self.persist_finished(&snapshot);
        }
        let bot_next = !finished && game.current_player().map_or(false, |p| p.is_bot());
        drop(game);
        if bot_next {
            self.spawn_opponent(id);
        }
        Ok(snapshot)
    }

    // ─────────────────────────────────────────────────────────────────
    // Connection registry
    // ─────────────────────────────────────────────────────────────────

    /// Registers a connection and returns its handle id plus the receive
    /// side of its bounded outbound queue.
    pub async fn register_handle(
        &self,
        game_id: GameId,
        player_id: PlayerId,
    ) -> (HandleId, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.outbound_capacity);
        let id = HandleId::new();
        self.handles.write().await.insert(
            id,
            ConnectedHandle {
                player_id,
                game_id,
                outbound: tx,
            },
        );
        debug!(handle_id = %id, game_id = %game_id, "handle registered");
        (id, rx)
    }

    /// Removes a connection record and closes its delivery channel.
    ///
    /// Idempotent: repeated calls for the same handle are no-ops.
    pub async fn unregister_handle(&self, id: HandleId) {
        if let Some(handle) = self.handles.write().await.remove(&id) {
            debug!(
                handle_id = %id,
                game_id = %handle.game_id,
                player_id = %handle.player_id,
                "handle unregistered"
            );
        }
    }

    /// Number of live games (monitoring and tests).
    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }

    /// Number of registered connections (monitoring and tests).
    pub async fn handle_count(&self) -> usize {
        self.handles.read().await.len()
    }

    // ─────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────

    /// Looks up a game's serialization unit, releasing the collection
    /// lock before returning.
    async fn game(&self, id: GameId) -> Option<Arc<Mutex<Game>>> {
        self.games
            .read()
            .await
            .get(&id)
            .map(|entry| Arc::clone(&entry.game))
    }

    /// Uniform draw over the two slots.
    fn random_slot(&self) -> Slot {
        let mut rng = self.rng.lock().expect("rng lock poisoned");
        if rng.gen_range(0..2) == 0 {
            Slot::Zero
        } else {
            Slot::One
        }
    }

    /// One-shot timer: if the game is still waiting when it fires, the
    /// bot is seated through the normal join path, which also makes the
    /// check-then-act atomic under the session mutex.
    fn spawn_join_timeout(&self, id: GameId) {
        let Some(hub) = self.me.upgrade() else {
            return; // hub is shutting down
        };
        tokio::spawn(async move {
            tokio::time::sleep(hub.config.join_timeout).await;
            match hub.join_game(id, Player::bot()).await {
                Ok(_) => info!(game_id = %id, "no opponent arrived, seated the bot"),
                Err(GameError::AlreadyStarted) | Err(GameError::NotFound(_)) => {}
                Err(err) => warn!(game_id = %id, error = %err, "join timeout failed"),
            }
        });
    }

    /// Hands a finished game to the persistence collaborator on a
    /// detached task. Failures are logged and swallowed: the in-memory
    /// state is the source of truth.
    pub(crate) fn persist_finished(&self, snapshot: &GameSnapshot) {
        let Some(outcome) = snapshot.winner else {
            return;
        };
        let (winner, loser, is_draw) = match outcome {
            Outcome::Won(slot) => (
                snapshot.username(slot).map(str::to_owned),
                // Losses are only tallied for humans.
                snapshot
                    .player(slot.other())
                    .filter(|p| !p.is_bot())
                    .map(|p| p.username().to_owned()),
                false,
            ),
            Outcome::Draw => (
                snapshot.username(Slot::Zero).map(str::to_owned),
                snapshot.username(Slot::One).map(str::to_owned),
                true,
            ),
        };

        let store = Arc::clone(&self.store);
        let snapshot = snapshot.clone();
        tokio::spawn(async move {
            if let Err(err) = store.save_finished_game(&snapshot).await {
                warn!(game_id = %snapshot.id, error = %err, "failed to archive finished game");
            }
            if let Err(err) = store.record_outcome(winner, loser, is_draw).await {
                warn!(game_id = %snapshot.id, error = %err, "failed to record outcome");
            }
        });
    }
}
