//! Heuristic automated opponent.
//!
//! Move selection, in priority order: take an immediate win, block the
//! opponent's immediate win, extend a three-in-a-row threat, extend a
//! two-in-a-row threat, otherwise prefer columns nearest the center.
//! Candidate moves are evaluated on a copy of the board; the shared game
//! state is never touched.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::game::{Board, Slot, COLS, ROWS};
use crate::ports::MoveChooser;

/// Center-out column preference used when no threat is on the board.
const CENTER_PREFERENCE: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Default `MoveChooser` implementation.
pub struct HeuristicBot {
    /// Tie-breaking among equally good candidates. Explicitly seeded so
    /// games are reproducible in tests.
    rng: Mutex<StdRng>,
}

impl HeuristicBot {
    /// Creates a bot with the given random source.
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Creates a bot seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Column where `slot` would complete a run of four, if any.
    fn winning_column(board: &Board, slot: Slot) -> Option<usize> {
        (0..COLS).find(|&col| {
            let mut probe = board.clone();
            matches!(probe.drop_piece(col, slot), Ok(row) if probe.wins_at(row, col))
        })
    }

    /// Whether dropping into `col` leaves `slot` with an unblocked run
    /// of at least `min_run` own-or-empty cells somewhere.
    fn creates_potential(board: &Board, slot: Slot, col: usize, min_run: usize) -> bool {
        let mut probe = board.clone();
        if probe.drop_piece(col, slot).is_err() {
            return false;
        }
        Self::has_potential(&probe, slot, min_run)
    }

    fn has_potential(board: &Board, slot: Slot, min_run: usize) -> bool {
        const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
        for row in 0..ROWS {
            for col in 0..COLS {
                if board.cell(row, col).map_or(false, |owner| owner != slot) {
                    continue;
                }
                for (dr, dc) in DIRECTIONS {
                    if Self::open_run(board, slot, row, col, dr, dc) >= min_run {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Counts own-or-empty cells walking up to four steps from the start,
    /// stopping at the opponent or the edge.
    fn open_run(board: &Board, slot: Slot, row: usize, col: usize, dr: i32, dc: i32) -> usize {
        let mut n = 0;
        for i in 0..4 {
            let r = row as i32 + i * dr;
            let c = col as i32 + i * dc;
            if !(0..ROWS as i32).contains(&r) || !(0..COLS as i32).contains(&c) {
                break;
            }
            match board.cell(r as usize, c as usize) {
                Some(owner) if owner != slot => break,
                _ => n += 1,
            }
        }
        n
    }
}

impl MoveChooser for HeuristicBot {
    fn choose_column(&self, board: &Board, own: Slot) -> Option<usize> {
        if let Some(col) = Self::winning_column(board, own) {
            return Some(col);
        }
        if let Some(col) = Self::winning_column(board, own.other()) {
            return Some(col);
        }

        for min_run in [3, 2] {
            let candidates: Vec<usize> = (0..COLS)
                .filter(|&col| Self::creates_potential(board, own, col, min_run))
                .collect();
            if !candidates.is_empty() {
                let mut rng = self.rng.lock().expect("rng lock poisoned");
                return Some(candidates[rng.gen_range(0..candidates.len())]);
            }
        }

        CENTER_PREFERENCE
            .iter()
            .copied()
            .find(|&col| board.is_column_open(col))
    }
}
