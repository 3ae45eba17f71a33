//! Game-specific error taxonomy.
//!
//! Every variant is recoverable at the boundary: it is reported back to
//! the caller of the failing operation, never treated as fatal.

use thiserror::Error;

use crate::domain::foundation::GameId;

/// Errors produced by game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No game with this id is tracked by the hub.
    #[error("game not found: {0}")]
    NotFound(GameId),

    /// The acting participant does not hold the current turn.
    #[error("not your turn")]
    NotYourTurn,

    /// Column index outside 0..=6.
    #[error("invalid column: {0}")]
    InvalidColumn(usize),

    /// All six cells of the column are occupied.
    #[error("column {0} is full")]
    ColumnFull(usize),

    /// The game is not in the active state.
    #[error("game is not active")]
    InactiveGame,

    /// A second participant already filled slot 1.
    #[error("game already started")]
    AlreadyStarted,
}

impl GameError {
    /// Stable machine-readable code for wire responses.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::NotFound(_) => "not_found",
            GameError::NotYourTurn => "not_your_turn",
            GameError::InvalidColumn(_) => "invalid_column",
            GameError::ColumnFull(_) => "column_full",
            GameError::InactiveGame => "inactive_game",
            GameError::AlreadyStarted => "already_started",
        }
    }
}
