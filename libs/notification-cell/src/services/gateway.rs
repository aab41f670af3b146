// libs/notification-cell/src/services/gateway.rs
use reqwest::Client;
use tracing::debug;

use shared_config::AppConfig;

use crate::models::{NotificationError, SendMessageRequest, SendMessageResponse};

/// HTTP client for the external messaging relay.
///
/// The relay accepts `POST /send-message` with `{"message": ...}` and
/// answers `{"success", "messageId" | "error"}`.
#[derive(Clone)]
pub struct MessageGateway {
    client: Client,
    base_url: String,
}

impl MessageGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.message_gateway_url.clone(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn send_message(&self, text: &str) -> Result<SendMessageResponse, NotificationError> {
        let url = format!("{}/send-message", self.base_url);
        debug!("Dispatching notification to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest {
                message: text.to_string(),
            })
            .send()
            .await?;

        let body: SendMessageResponse = response.json().await?;

        if !body.success {
            return Err(NotificationError::Refused(
                body.error.unwrap_or_else(|| "unknown gateway error".to_string()),
            ));
        }

        Ok(body)
    }
}
