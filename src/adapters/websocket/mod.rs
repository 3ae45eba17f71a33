//! WebSocket transport - upgrade handling and the wire protocol.

mod handler;
mod messages;

pub use handler::{ws_handler, WsQuery};
pub use messages::{ClientMessage, MakeMovePayload};
