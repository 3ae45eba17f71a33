//! Board engine: the 6x7 grid and its pure placement/win/draw rules.
//!
//! The board has value semantics and no concurrency of its own. Given an
//! identical sequence of valid moves the resulting grid is bit-identical;
//! any randomness (starting player, bot tie-breaks) lives outside.

use serde::{Deserialize, Serialize};

use super::errors::GameError;

/// Number of rows. Row 0 is the top of the board, row 5 the bottom.
pub const ROWS: usize = 6;

/// Number of columns.
pub const COLS: usize = 7;

/// One of the two fixed participant positions within a game.
///
/// Doubles as the turn index: the slot currently entitled to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Zero,
    One,
}

impl Slot {
    /// The opposing slot.
    pub fn other(self) -> Slot {
        match self {
            Slot::Zero => Slot::One,
            Slot::One => Slot::Zero,
        }
    }

    /// Array index of this slot.
    pub fn index(self) -> usize {
        match self {
            Slot::Zero => 0,
            Slot::One => 1,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot {}", self.index())
    }
}

/// The playing grid. Each cell is empty or owned by one slot.
///
/// # Invariants
///
/// - Occupied cells in a column form a contiguous run from the bottom;
///   pieces never float.
/// - A column holds at most [`ROWS`] pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Slot>; COLS]; ROWS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Returns the owner of a cell, if any.
    pub fn cell(&self, row: usize, col: usize) -> Option<Slot> {
        self.cells[row][col]
    }

    /// Returns the full grid, rows top to bottom.
    pub fn rows(&self) -> &[[Option<Slot>; COLS]; ROWS] {
        &self.cells
    }

    /// Whether the column exists and still has room.
    pub fn is_column_open(&self, col: usize) -> bool {
        col < COLS && self.cells[0][col].is_none()
    }

    /// Columns that can still accept a piece, left to right.
    pub fn open_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&c| self.is_column_open(c)).collect()
    }

    /// Whether every cell of the top row is occupied (the draw condition).
    pub fn is_top_row_full(&self) -> bool {
        self.cells[0].iter().all(|cell| cell.is_some())
    }

    /// Places a piece for `slot` in the lowest empty row of `col`.
    ///
    /// Returns the landing row.
    ///
    /// # Errors
    ///
    /// - `InvalidColumn` if `col` is outside 0..=6
    /// - `ColumnFull` if the column holds six pieces
    pub fn drop_piece(&mut self, col: usize, slot: Slot) -> Result<usize, GameError> {
        if col >= COLS {
            return Err(GameError::InvalidColumn(col));
        }

        let row = (0..ROWS)
            .rev()
            .find(|&r| self.cells[r][col].is_none())
            .ok_or(GameError::ColumnFull(col))?;

        self.cells[row][col] = Some(slot);
        Ok(row)
    }

    /// Whether the piece at (`row`, `col`) completes a run of four.
    ///
    /// Scans the four lines through the cell: horizontal, vertical, and
    /// both diagonals, counting the contiguous same-owner run that passes
    /// through it.
    pub fn wins_at(&self, row: usize, col: usize) -> bool {
        let Some(owner) = self.cells[row][col] else {
            return false;
        };

        const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let run = 1
                + self.run_length(row, col, dr, dc, owner)
                + self.run_length(row, col, -dr, -dc, owner);
            run >= 4
        })
    }

    /// Length of the same-owner run extending from (`row`, `col`) in one
    /// direction, not counting the starting cell.
    fn run_length(&self, row: usize, col: usize, dr: i32, dc: i32, owner: Slot) -> usize {
        let mut n = 0;
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        while (0..ROWS as i32).contains(&r)
            && (0..COLS as i32).contains(&c)
            && self.cells[r as usize][c as usize] == Some(owner)
        {
            n += 1;
            r += dr;
            c += dc;
        }
        n
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pieces_stack_from_the_bottom() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(3, Slot::Zero).unwrap(), 5);
        assert_eq!(board.drop_piece(3, Slot::One).unwrap(), 4);
        assert_eq!(board.drop_piece(3, Slot::Zero).unwrap(), 3);
        assert_eq!(board.cell(5, 3), Some(Slot::Zero));
        assert_eq!(board.cell(4, 3), Some(Slot::One));
    }

    #[test]
    fn column_accepts_exactly_six_pieces() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let slot = if i % 2 == 0 { Slot::Zero } else { Slot::One };
            board.drop_piece(0, slot).unwrap();
        }
        assert_eq!(
            board.drop_piece(0, Slot::Zero),
            Err(GameError::ColumnFull(0))
        );
    }

    #[test]
    fn out_of_range_column_is_rejected() {
        let mut board = Board::new();
        assert_eq!(
            board.drop_piece(7, Slot::Zero),
            Err(GameError::InvalidColumn(7))
        );
    }

    #[test]
    fn detects_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            board.drop_piece(col, Slot::Zero).unwrap();
        }
        assert!(board.wins_at(5, 3));
        assert!(board.wins_at(5, 0));
    }

    #[test]
    fn detects_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.drop_piece(2, Slot::One).unwrap();
        }
        assert!(board.wins_at(2, 2));
    }

    #[test]
    fn detects_rising_diagonal_win() {
        let mut board = Board::new();
        // Staircase: column c needs c filler pieces below the diagonal cell.
        for col in 0..4 {
            for _ in 0..col {
                board.drop_piece(col, Slot::One).unwrap();
            }
            board.drop_piece(col, Slot::Zero).unwrap();
        }
        assert!(board.wins_at(5 - 3, 3));
    }

    #[test]
    fn detects_falling_diagonal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            for _ in 0..(3 - col) {
                board.drop_piece(col, Slot::One).unwrap();
            }
            board.drop_piece(col, Slot::Zero).unwrap();
        }
        assert!(board.wins_at(5 - 3, 0));
    }

    #[test]
    fn three_in_a_row_is_not_a_win() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Slot::Zero).unwrap();
        }
        assert!(!board.wins_at(5, 2));
    }

    #[test]
    fn mixed_owners_break_the_run() {
        let mut board = Board::new();
        board.drop_piece(0, Slot::Zero).unwrap();
        board.drop_piece(1, Slot::Zero).unwrap();
        board.drop_piece(2, Slot::One).unwrap();
        board.drop_piece(3, Slot::Zero).unwrap();
        board.drop_piece(4, Slot::Zero).unwrap();
        assert!(!board.wins_at(5, 4));
    }

    #[test]
    fn top_row_full_requires_every_column() {
        let mut board = Board::new();
        for col in 0..COLS - 1 {
            for i in 0..ROWS {
                let slot = if (i + col) % 2 == 0 { Slot::Zero } else { Slot::One };
                board.drop_piece(col, slot).unwrap();
            }
        }
        assert!(!board.is_top_row_full());
        assert_eq!(board.open_columns(), vec![6]);
    }

    #[test]
    fn serialization_round_trips() {
        let mut board = Board::new();
        board.drop_piece(3, Slot::Zero).unwrap();
        board.drop_piece(3, Slot::One).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, parsed);
    }
}
