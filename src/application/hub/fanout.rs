//! Broadcast fanout - delivers serialized snapshots to connected handles.
//!
//! Delivery is non-blocking per handle: a full or closed outbound queue
//! marks the handle as disconnected and releases its resources instead of
//! stalling the broadcast for everyone else. This bounds worst-case
//! fanout latency independent of any single slow consumer.

use serde::Serialize;
use tracing::debug;

use crate::domain::foundation::HandleId;
use crate::domain::game::{GameError, GameSnapshot};

use super::GameHub;

/// Frames the hub pushes into outbound queues.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum HubMessage {
    /// Full session snapshot after an accepted state change.
    GameUpdate(GameSnapshot),
    /// Structured failure for a single connection.
    Error { code: String, message: String },
}

impl HubMessage {
    /// Wraps a snapshot.
    pub fn game_update(snapshot: GameSnapshot) -> Self {
        HubMessage::GameUpdate(snapshot)
    }

    /// Wraps a game error for the wire.
    pub fn game_error(err: &GameError) -> Self {
        HubMessage::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }

    /// Serializes the frame once; the same string is enqueued to every
    /// recipient.
    fn to_frame(&self) -> String {
        serde_json::to_string(self).expect("hub message serialization should not fail")
    }
}

impl GameHub {
    /// Enqueues a frame to every registered handle.
    ///
    /// Called while the originating session's mutex is held, so the frame
    /// is queued before the critical section releases and observers see
    /// transitions in application order. Handles whose queue rejects the
    /// frame are unregistered.
    pub(crate) async fn broadcast(&self, message: &HubMessage) {
        let frame = message.to_frame();

        let stale: Vec<HandleId> = {
            let handles = self.handles.read().await;
            handles
                .iter()
                .filter(|(_, handle)| handle.outbound.try_send(frame.clone()).is_err())
                .map(|(id, _)| *id)
                .collect()
        };

        for id in stale {
            debug!(handle_id = %id, "outbound queue rejected frame, dropping connection");
            self.unregister_handle(id).await;
        }
    }

    /// Enqueues a frame to a single handle (per-connection errors).
    ///
    /// Unknown handles are ignored; a rejected enqueue drops the handle
    /// just like a failed broadcast.
    pub async fn send_to(&self, id: HandleId, message: &HubMessage) {
        let frame = message.to_frame();
        let delivered = self
            .handles
            .read()
            .await
            .get(&id)
            .map(|handle| handle.outbound.try_send(frame).is_ok());

        if delivered == Some(false) {
            self.unregister_handle(id).await;
        }
    }
}
