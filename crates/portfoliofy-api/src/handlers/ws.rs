//! WebSocket upgrade handler for realtime notification pushes.
//!
//! The socket is one-way: the server tells a user that their notification
//! set changed and the client refetches over REST.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use uuid::Uuid;

use portfoliofy_core::events::DomainEvent;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// Frame pushed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    /// Always `notifications_changed`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Whose notifications changed.
    pub user_id: Uuid,
}

impl PushMessage {
    /// Push frame for `user_id`.
    pub fn notifications_changed(user_id: Uuid) -> Self {
        Self {
            kind: "notifications_changed",
            user_id,
        }
    }

    /// Frame for `event`, if it concerns `user_id`.
    pub fn for_event(event: &DomainEvent, user_id: Uuid) -> Option<Self> {
        (event.notifications_changed_for() == Some(user_id))
            .then(|| Self::notifications_changed(user_id))
    }
}

/// GET /api/ws?token={jwt}
pub async fn ws_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    // Authenticate before upgrade
    let claims = state.jwt_decoder.decode(&query.token)?;
    let user_id = claims.user_id();
    let events = state.events.subscribe();

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(socket, user_id, events)))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(socket: WebSocket, user_id: Uuid, mut events: Receiver<DomainEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    info!(user_id = %user_id, "WebSocket connection established");

    let outbound_task = tokio::spawn(async move {
        loop {
            let push = match events.recv().await {
                Ok(event) => PushMessage::for_event(&event, user_id),
                // Dropped events may have been ours; have the client refetch.
                Err(RecvError::Lagged(skipped)) => {
                    warn!(user_id = %user_id, skipped, "WebSocket subscriber lagged");
                    Some(PushMessage::notifications_changed(user_id))
                }
                Err(RecvError::Closed) => break,
            };
            let Some(push) = push else { continue };
            let Ok(text) = serde_json::to_string(&push) else {
                continue;
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Inbound frames are ignored; ping/pong is handled by axum.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(user_id = %user_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    info!(user_id = %user_id, "WebSocket connection closed");
}
