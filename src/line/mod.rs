//! LINE Messaging API collaborators
//!
//! Webhook payload models, `x-line-signature` verification and a reply
//! client. Rich-menu provisioning lives in the `menu` submodule.
//! Uses a long-lived reqwest::Client for connection pooling.

pub mod menu;

use crate::error::{BotError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;
use std::time::Duration;
use tracing::{error, info};

type HmacSha256 = Hmac<Sha256>;

const LINE_API_BASE: &str = "https://api.line.me";

//
// ================= Webhook Models =================
//

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub message: Option<MessageContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageContent {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

//
// ================= Signature Verification =================
//

/// Validate the `x-line-signature` header against the channel secret.
///
/// The signature is base64(HMAC-SHA256(secret, raw request body)); it must
/// be computed over the exact bytes LINE sent, before any deserialization.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    let expected = STANDARD.encode(mac.finalize().into_bytes());
    expected == signature
}

//
// ================= Reply Client =================
//

/// Reusable LINE Messaging API client (connection-pooled)
pub struct LineClient {
    client: Client,
    access_token: String,
    api_base: String,
}

impl LineClient {
    pub fn new(access_token: String) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            access_token,
            api_base: LINE_API_BASE.to_string(),
        })
    }

    /// Send one text message through the reply endpoint.
    pub async fn reply(&self, reply_token: &str, text: &str) -> Result<()> {
        let body = json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });

        let response = self
            .client
            .post(format!("{}/v2/bot/message/reply", self.api_base))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("LINE reply request failed: {}", e);
                BotError::LineApiError(format!("reply request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("LINE reply endpoint returned {}: {}", status, error_text);
            return Err(BotError::LineApiError(format!(
                "reply endpoint returned {}: {}",
                status, error_text
            )));
        }

        info!("Reply sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-channel-secret";
    const BODY: &[u8] = br#"{"events":[]}"#;
    // base64(HMAC-SHA256(SECRET, BODY))
    const SIGNATURE: &str = "sKRrt+MTE71nWWZPaYrvYSdH9JGlgckmBidZxDuPgPc=";

    #[test]
    fn test_valid_signature_accepted() {
        assert!(verify_signature(SECRET, BODY, SIGNATURE));
    }

    #[test]
    fn test_invalid_signature_rejected() {
        assert!(!verify_signature(SECRET, BODY, "bm90LWEtc2lnbmF0dXJl"));
        assert!(!verify_signature("other-secret", BODY, SIGNATURE));
        assert!(!verify_signature(SECRET, b"tampered body", SIGNATURE));
    }

    #[test]
    fn test_webhook_payload_deserialization() {
        let raw = r#"{
            "destination": "Uxxxx",
            "events": [{
                "type": "message",
                "replyToken": "abc123",
                "message": { "type": "text", "id": "1", "text": "100美金" }
            }]
        }"#;

        let payload: WebhookPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.events.len(), 1);

        let event = &payload.events[0];
        assert_eq!(event.event_type, "message");
        assert_eq!(event.reply_token.as_deref(), Some("abc123"));

        let message = event.message.as_ref().unwrap();
        assert_eq!(message.message_type, "text");
        assert_eq!(message.text.as_deref(), Some("100美金"));
    }

    #[test]
    fn test_non_message_event_deserialization() {
        let raw = r#"{"events":[{"type":"follow","replyToken":"abc"}]}"#;
        let payload: WebhookPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.events[0].event_type, "follow");
        assert!(payload.events[0].message.is_none());
    }
}
