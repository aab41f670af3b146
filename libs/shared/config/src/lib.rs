use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub appointment_store_url: String,
    pub appointment_store_api_key: String,
    pub message_gateway_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            appointment_store_url: env::var("APPOINTMENT_STORE_URL")
                .unwrap_or_else(|_| {
                    warn!("APPOINTMENT_STORE_URL not set, using empty value");
                    String::new()
                }),
            appointment_store_api_key: env::var("APPOINTMENT_STORE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("APPOINTMENT_STORE_API_KEY not set, using empty value");
                    String::new()
                }),
            message_gateway_url: env::var("MESSAGE_GATEWAY_URL")
                .unwrap_or_else(|_| {
                    warn!("MESSAGE_GATEWAY_URL not set, using empty value");
                    String::new()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.appointment_store_url.is_empty()
    }

    pub fn is_gateway_configured(&self) -> bool {
        !self.message_gateway_url.is_empty()
    }
}
