//! Game aggregate - one session of the board contest.
//!
//! Owns the board, the two participant slots, turn tracking, and the
//! lifecycle state machine. All mutation happens through `join` and
//! `play`; the hub serializes calls so at most one move is in flight per
//! game at any instant.

use crate::domain::foundation::{GameId, PlayerId, Timestamp};

use super::board::{Board, Slot};
use super::errors::GameError;
use super::player::Player;
use super::snapshot::GameSnapshot;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a game.
///
/// Transitions only waiting → active → finished, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Slot 1 is unfilled; no moves accepted yet.
    Waiting,
    /// Both slots filled, moves accepted.
    Active,
    /// Terminal. `outcome` is set.
    Finished,
}

impl GameStatus {
    /// Lowercase wire/storage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Waiting => "waiting",
            GameStatus::Active => "active",
            GameStatus::Finished => "finished",
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Top row filled with no run of four anywhere.
    Draw,
    /// The referenced slot completed a run of four.
    Won(Slot),
}

/// Result of one accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove {
    /// Row the piece landed in.
    pub row: usize,
    /// Column the piece was played into.
    pub column: usize,
    /// Slot that made the move.
    pub by: Slot,
}

/// One game session.
///
/// # Invariants
///
/// - slot 0 is always filled; slot 1 is filled exactly when status is
///   not `Waiting`
/// - the turn index alternates strictly after every accepted move except
///   the one that finishes the game
/// - `outcome` is `Some` if and only if status is `Finished`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    board: Board,
    players: [Option<Player>; 2],
    turn: Slot,
    status: GameStatus,
    outcome: Option<Outcome>,
    created_at: Timestamp,
    last_move_at: Option<Timestamp>,
}

impl Game {
    /// Creates a waiting game with the creator in slot 0.
    pub fn new(id: GameId, creator: Player) -> Self {
        Self {
            id,
            board: Board::new(),
            players: [Some(creator), None],
            turn: Slot::Zero,
            status: GameStatus::Waiting,
            outcome: None,
            created_at: Timestamp::now(),
            last_move_at: None,
        }
    }

    /// Fills slot 1 and activates the game with the given starting turn.
    ///
    /// # Errors
    ///
    /// - `AlreadyStarted` if the game left the waiting state
    pub fn join(&mut self, player: Player, starting: Slot) -> Result<(), GameError> {
        if self.status != GameStatus::Waiting {
            return Err(GameError::AlreadyStarted);
        }
        self.players[1] = Some(player);
        self.status = GameStatus::Active;
        self.turn = starting;
        Ok(())
    }

    /// Applies a move for the slot currently holding the turn.
    ///
    /// Places a piece in the lowest empty row of `column`, then either
    /// finishes the game (run of four, or full top row) or flips the
    /// turn.
    ///
    /// # Errors
    ///
    /// - `InactiveGame` unless status is `Active`
    /// - `InvalidColumn` / `ColumnFull` from the board
    pub fn play(&mut self, column: usize) -> Result<PlayedMove, GameError> {
        if self.status != GameStatus::Active {
            return Err(GameError::InactiveGame);
        }

        let by = self.turn;
        let row = self.board.drop_piece(column, by)?;
        self.last_move_at = Some(Timestamp::now());

        if self.board.wins_at(row, column) {
            self.status = GameStatus::Finished;
            self.outcome = Some(Outcome::Won(by));
        } else if self.board.is_top_row_full() {
            self.status = GameStatus::Finished;
            self.outcome = Some(Outcome::Draw);
        } else {
            self.turn = by.other();
        }

        Ok(PlayedMove { row, column, by })
    }

    // ─────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────

    /// Returns the game id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the participant in the given slot, if filled.
    pub fn player(&self, slot: Slot) -> Option<&Player> {
        self.players[slot.index()].as_ref()
    }

    /// Returns the slot currently entitled to move.
    pub fn turn(&self) -> Slot {
        self.turn
    }

    /// Returns the participant whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.turn)
    }

    /// Whether the given participant holds the current turn.
    ///
    /// Matches by participant identity, not by slot position.
    pub fn is_turn_of(&self, player_id: &PlayerId) -> bool {
        self.current_player().map_or(false, |p| p.id() == player_id)
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns when the game was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the last move was applied.
    pub fn last_move_at(&self) -> Option<Timestamp> {
        self.last_move_at
    }

    /// Serializable point-in-time copy of the full session state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id,
            board: self.board.clone(),
            players: self.players.clone(),
            current_turn: self.turn,
            status: self.status,
            winner: self.outcome,
            created_at: self.created_at,
            last_move_at: self.last_move_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PlayerId;
    use crate::domain::game::board::{COLS, ROWS};

    fn active_game(starting: Slot) -> (Game, PlayerId, PlayerId) {
        let a = PlayerId::new();
        let b = PlayerId::new();
        let mut game = Game::new(GameId::new(), Player::human(a, "alice"));
        game.join(Player::human(b, "bob"), starting).unwrap();
        (game, a, b)
    }

    #[test]
    fn new_game_waits_with_creator_in_slot_zero() {
        let game = Game::new(GameId::new(), Player::human(PlayerId::new(), "alice"));
        assert_eq!(game.status(), GameStatus::Waiting);
        assert_eq!(game.player(Slot::Zero).unwrap().username(), "alice");
        assert!(game.player(Slot::One).is_none());
        assert!(game.outcome().is_none());
    }

    #[test]
    fn join_activates_and_sets_starting_turn() {
        let (game, _, b) = active_game(Slot::One);
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.turn(), Slot::One);
        assert!(game.is_turn_of(&b));
    }

    #[test]
    fn second_join_fails_with_already_started() {
        let (mut game, _, _) = active_game(Slot::Zero);
        let late = Player::human(PlayerId::new(), "carol");
        assert_eq!(game.join(late, Slot::Zero), Err(GameError::AlreadyStarted));
    }

    #[test]
    fn play_before_activation_fails() {
        let mut game = Game::new(GameId::new(), Player::human(PlayerId::new(), "alice"));
        assert_eq!(game.play(3), Err(GameError::InactiveGame));
    }

    #[test]
    fn turn_alternates_after_each_accepted_move() {
        let (mut game, _, _) = active_game(Slot::Zero);
        game.play(0).unwrap();
        assert_eq!(game.turn(), Slot::One);
        game.play(1).unwrap();
        assert_eq!(game.turn(), Slot::Zero);
    }

    #[test]
    fn rejected_move_leaves_turn_and_board_unchanged() {
        let (mut game, _, _) = active_game(Slot::Zero);
        let before = game.board().clone();
        assert_eq!(game.play(9), Err(GameError::InvalidColumn(9)));
        assert_eq!(game.turn(), Slot::Zero);
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn four_in_a_column_finishes_with_winner() {
        // Starter stacks column 3 while the opponent fills the bottom row
        // elsewhere; the fourth stacked piece wins.
        let (mut game, a, _) = active_game(Slot::Zero);
        for other in [0, 1, 2] {
            game.play(3).unwrap();
            game.play(other).unwrap();
        }
        game.play(3).unwrap();

        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.outcome(), Some(Outcome::Won(Slot::Zero)));
        assert!(game.is_turn_of(&a), "turn must not alternate past the end");
        for row in 2..ROWS {
            assert_eq!(game.board().cell(row, 3), Some(Slot::Zero));
        }
        assert_eq!(game.play(0), Err(GameError::InactiveGame));
    }

    #[test]
    fn full_board_without_a_run_is_a_draw() {
        // Column pairs with opposite bottom owners are filled in lockstep;
        // the resulting grid alternates owners in a pattern with no run of
        // four in any direction.
        let (mut game, _, _) = active_game(Slot::Zero);
        let mut moves: Vec<usize> = Vec::new();
        for (x, y) in [(0, 2), (1, 3), (4, 6)] {
            for _ in 0..3 {
                moves.extend_from_slice(&[x, y, y, x]);
            }
        }
        moves.extend_from_slice(&[5; 6]);

        for (i, &col) in moves.iter().enumerate() {
            assert_ne!(
                game.status(),
                GameStatus::Finished,
                "premature finish before move {i}"
            );
            game.play(col).unwrap();
        }

        assert_eq!(game.status(), GameStatus::Finished);
        assert_eq!(game.outcome(), Some(Outcome::Draw));
        assert!(game.board().is_top_row_full());
    }

    #[test]
    fn last_move_timestamp_tracks_accepted_moves() {
        let (mut game, _, _) = active_game(Slot::Zero);
        assert!(game.last_move_at().is_none());
        game.play(0).unwrap();
        assert!(game.last_move_at().is_some());
    }

    #[test]
    fn snapshot_mirrors_live_state() {
        let (mut game, _, _) = active_game(Slot::Zero);
        game.play(2).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.id, game.id());
        assert_eq!(snapshot.board, *game.board());
        assert_eq!(snapshot.status, game.status());
        assert_eq!(snapshot.current_turn, game.turn());
    }

    mod win_detection_agrees_with_brute_force {
        use super::*;
        use proptest::prelude::*;

        /// Exhaustive scan of every four-cell window in the grid.
        fn brute_force_winner(board: &Board) -> Option<Slot> {
            let deltas = [(0i32, 1i32), (1, 0), (1, 1), (1, -1)];
            for row in 0..ROWS as i32 {
                for col in 0..COLS as i32 {
                    for (dr, dc) in deltas {
                        let end_r = row + 3 * dr;
                        let end_c = col + 3 * dc;
                        if !(0..ROWS as i32).contains(&end_r)
                            || !(0..COLS as i32).contains(&end_c)
                        {
                            continue;
                        }
                        let owner = board.cell(row as usize, col as usize);
                        if owner.is_some()
                            && (1..4).all(|i| {
                                board.cell(
                                    (row + i * dr) as usize,
                                    (col + i * dc) as usize,
                                ) == owner
                            })
                        {
                            return owner;
                        }
                    }
                }
            }
            None
        }

        proptest! {
            #[test]
            fn random_games_end_consistently(cols in proptest::collection::vec(0usize..COLS, 1..200)) {
                let (mut game, _, _) = active_game(Slot::Zero);
                for &col in &cols {
                    if game.status() == GameStatus::Finished {
                        break;
                    }
                    // Full columns are simply skipped by the generator.
                    let _ = game.play(col);
                }

                let brute = brute_force_winner(game.board());
                match game.outcome() {
                    Some(Outcome::Won(slot)) => prop_assert_eq!(brute, Some(slot)),
                    Some(Outcome::Draw) => {
                        prop_assert_eq!(brute, None);
                        prop_assert!(game.board().is_top_row_full());
                    }
                    None => prop_assert_eq!(brute, None),
                }
            }
        }
    }
}
