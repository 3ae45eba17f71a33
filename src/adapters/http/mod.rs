//! HTTP transport - REST endpoints and shared router state.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateGameRequest, ErrorResponse, JoinGameRequest};
pub use routes::api_router;

use std::sync::Arc;

use crate::application::hub::GameHub;
use crate::ports::GameStore;

/// State shared by every HTTP and WebSocket handler.
#[derive(Clone)]
pub struct AppState {
    pub hub: Arc<GameHub>,
    pub store: Arc<dyn GameStore>,
}
