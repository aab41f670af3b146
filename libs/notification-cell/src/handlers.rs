// libs/notification-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use shared_models::AppError;

use crate::models::{InboundMessage, SendMessageRequest, WebhookReply};
use crate::services::gateway::MessageGateway;
use crate::services::webhook::canned_reply;

/// Relay a text message through the external gateway.
pub async fn send_message(
    State(gateway): State<Arc<MessageGateway>>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let response = gateway.send_message(&request.message).await.map_err(|e| {
        warn!("Message relay failed: {}", e);
        AppError::ExternalService(e.to_string())
    })?;

    Ok(Json(json!({
        "success": true,
        "messageId": response.message_id,
    })))
}

/// Inbound webhook: answer a patient text with a canned reply.
pub async fn inbound_webhook(Json(inbound): Json<InboundMessage>) -> Json<WebhookReply> {
    tracing::debug!("Inbound message from {}", inbound.from);
    Json(WebhookReply {
        reply: canned_reply(&inbound.body),
    })
}
