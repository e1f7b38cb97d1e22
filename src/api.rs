//! Webhook server for the exchange-rate bot
//!
//! Exposes the LINE callback endpoint. The raw request body is kept as
//! bytes until the signature check passes; only then is it deserialized.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::line::{self, LineClient, WebhookEvent, WebhookPayload};
use crate::rates::RateClient;
use crate::reply;

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub line: Arc<LineClient>,
    pub rates: Arc<RateClient>,
    pub channel_secret: String,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// LINE Callback Endpoint
/// =============================

async fn callback(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let signature = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !line::verify_signature(&state.channel_secret, &body, signature) {
        warn!("Rejected webhook delivery with invalid signature");
        return (StatusCode::BAD_REQUEST, "invalid signature");
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Malformed webhook payload: {}", e);
            return (StatusCode::BAD_REQUEST, "invalid payload");
        }
    };

    for event in payload.events {
        handle_event(&state, event).await;
    }

    (StatusCode::OK, "OK")
}

/// Handle one webhook event; reply failures are logged, never returned.
async fn handle_event(state: &ApiState, event: WebhookEvent) {
    if event.event_type != "message" {
        return;
    }

    let Some(message) = event.message else {
        return;
    };
    if message.message_type != "text" {
        return;
    }

    let (Some(text), Some(reply_token)) = (message.text, event.reply_token) else {
        return;
    };

    info!("Received text message: {}", text);

    let reply_text = reply::build_reply(&text, &state.rates).await;

    if let Err(e) = state.line.reply(&reply_token, &reply_text).await {
        error!("Failed to send reply: {}", e);
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/callback", post(callback))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(state: ApiState, port: u16) -> crate::Result<()> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("Webhook server listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
