//! WebSocket upgrade handler and per-connection pumps.
//!
//! Each connection runs two tasks for its lifetime: a write pump that
//! drains the handle's bounded outbound queue into the socket, and a
//! read pump that maps inbound frames onto hub operations. Either pump
//! ending tears the connection down and unregisters the handle.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::debug;

use crate::adapters::http::AppState;
use crate::application::hub::HubMessage;
use crate::domain::foundation::{GameId, PlayerId};

use super::messages::ClientMessage;

/// Query parameters of the upgrade request.
///
/// Clients pass the ids they received from the create/join response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsQuery {
    pub game_id: GameId,
    pub player_id: PlayerId,
}

/// GET /ws?gameId=..&playerId=.. - upgrade to a live game connection.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, query, state))
}

async fn handle_socket(socket: WebSocket, query: WsQuery, state: AppState) {
    let (mut sink, mut stream) = socket.split();

    let (handle_id, mut outbound) = state
        .hub
        .register_handle(query.game_id, query.player_id)
        .await;

    // Write pump: queued frames out to the wire. Ends when the handle is
    // unregistered (channel closed) or the socket dies.
    let mut write_task = tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            if sink.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
        let _ = sink.send(Message::Close(None)).await;
    });

    // Read pump: inbound frames onto hub operations.
    let hub = state.hub.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(result) = stream.next().await {
            match result {
                Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::MakeMove(payload)) => {
                        if let Err(err) = hub
                            .submit_move(payload.game_id, payload.player_id, payload.column)
                            .await
                        {
                            debug!(
                                handle_id = %handle_id,
                                game_id = %payload.game_id,
                                error = %err,
                                "move rejected"
                            );
                            hub.send_to(handle_id, &HubMessage::game_error(&err)).await;
                        }
                    }
                    Err(err) => {
                        debug!(handle_id = %handle_id, error = %err, "unparseable frame");
                    }
                },
                Ok(Message::Close(_)) => break,
                Ok(_) => {} // protocol pings/pongs handled by axum
                Err(err) => {
                    debug!(handle_id = %handle_id, error = %err, "socket receive error");
                    break;
                }
            }
        }
    });

    // Whichever pump finishes first takes the other down with it.
    tokio::select! {
        _ = &mut write_task => read_task.abort(),
        _ = &mut read_task => write_task.abort(),
    }

    state.hub.unregister_handle(handle_id).await;
}
