//! Foundation value objects shared across the domain.

mod ids;
mod timestamp;

pub use ids::{GameId, HandleId, PlayerId};
pub use timestamp::Timestamp;
