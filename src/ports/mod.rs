//! Ports - interfaces the hub consumes, implemented by adapters.

mod game_store;
mod move_chooser;

pub use game_store::{GameStore, LeaderboardEntry, StoreError};
pub use move_chooser::MoveChooser;
