//! MoveChooser port - the automated-opponent collaborator.

use crate::domain::game::{Board, Slot};

/// Computes a column for the automated participant.
///
/// Called with a read-only copy of the board; implementations must not
/// mutate hub state and must be safe to call from any task. The trait is
/// synchronous: choosing a move is pure CPU work with no await points,
/// and the hub invokes it while holding the session's serialization
/// unit.
///
/// Returning `None` means the chooser found no candidate; the hub then
/// falls back to the first open column before giving up.
pub trait MoveChooser: Send + Sync {
    /// Picks a column in 0..=6 for `own`, or `None` when no candidate
    /// was found.
    fn choose_column(&self, board: &Board, own: Slot) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_chooser_is_object_safe() {
        fn _accepts_dyn(_chooser: &dyn MoveChooser) {}
    }
}
