//! Operator health surface.
//!
//! `GET /` answers deployment liveness checks; `GET /bot/status` reports
//! the chat connection in detail.  Both read the injected
//! [`ConnectionState`], nothing else.

use std::sync::Arc;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::state::ConnectionState;

/// `GET /` response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// `connected` once the chat platform session is up, else `connecting`.
    pub bot_status: &'static str,
    /// RFC 3339 UTC timestamp of this response.
    pub timestamp: String,
}

/// `GET /bot/status` response payload.
#[derive(Serialize)]
pub struct BotStatusResponse {
    pub bot_ready: bool,
    pub bot_user: Option<String>,
    pub guild_count: usize,
}

async fn health_check(State(connection): State<Arc<ConnectionState>>) -> Json<HealthResponse> {
    let bot_status = if connection.is_ready() {
        "connected"
    } else {
        "connecting"
    };
    Json(HealthResponse {
        status: "healthy",
        bot_status,
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn bot_status(State(connection): State<Arc<ConnectionState>>) -> Json<BotStatusResponse> {
    Json(BotStatusResponse {
        bot_ready: connection.is_ready(),
        bot_user: connection.bot_user(),
        guild_count: connection.guild_count(),
    })
}

/// Mount the health routes over the shared connection state.
pub fn router(connection: Arc<ConnectionState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/bot/status", get(bot_status))
        .with_state(connection)
}
