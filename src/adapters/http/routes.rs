//! Router assembly: REST endpoints, the WebSocket upgrade, and the
//! cross-cutting tower-http layers.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::ws_handler;
use crate::config::ServerConfig;

use super::handlers::{create_game, health, join_game, leaderboard};
use super::AppState;

/// Builds the full application router.
pub fn api_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/game/create", post(create_game))
        .route("/game/join", post(join_game))
        .route("/leaderboard", get(leaderboard))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .with_state(state)
}

/// Permissive CORS by default; restricted to the configured origins when
/// any are set.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(AllowOrigin::list(origins))
    }
}
