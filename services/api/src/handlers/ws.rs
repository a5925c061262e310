//! Real-time channel: one WebSocket per client, joined to the user's room.
//!
//! Browsers cannot set an `Authorization` header on a WebSocket upgrade,
//! so the token travels in the query string.

use axum::{
    extract::{
        Query, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use uuid::Uuid;

use provault_auth::token::validate_token;

use crate::domain::repository::UserRepository as _;
use crate::error::ApiError;
use crate::infra::notifier::Notifier;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct WsQuery {
    pub token: String,
}

// ── GET /ws ──────────────────────────────────────────────────────────────────

pub async fn ws_handler(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let info =
        validate_token(&query.token, &state.jwt_secret).map_err(|_| ApiError::InvalidToken)?;
    let user = state
        .user_repo()
        .find_by_id(info.user_id)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    let notifier = state.notifier.clone();
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, notifier, user.id)))
}

async fn handle_socket(socket: WebSocket, notifier: Notifier, user_id: Uuid) {
    let (conn_id, mut events) = notifier.subscribe(user_id).await;
    tracing::debug!(%user_id, %conn_id, "websocket connected");

    let (mut sink, mut stream) = socket.split();
    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let Ok(text) = serde_json::to_string(&event) else { continue };
                if sink.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Inbound frames carry nothing we act on; pings are
                    // answered by the protocol layer.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    notifier.unsubscribe(user_id, conn_id).await;
    tracing::debug!(%user_id, %conn_id, "websocket disconnected");
}
