// libs/notification-cell/src/models.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// Gateway wire response: `{"success": true, "messageId": ...}` on
/// delivery, `{"success": false, "error": ...}` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub success: bool,
    #[serde(rename = "messageId", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Inbound webhook payload. Field casing follows the messaging provider's
/// form encoding, hence the PascalCase names on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "Body")]
    pub body: String,
    #[serde(rename = "From")]
    pub from: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookReply {
    pub reply: &'static str,
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("gateway refused the message: {0}")]
    Refused(String),

    #[error("gateway unreachable: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for NotificationError {
    fn from(err: reqwest::Error) -> Self {
        NotificationError::Transport(err.to_string())
    }
}
