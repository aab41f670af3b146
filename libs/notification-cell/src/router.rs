// libs/notification-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handlers;
use crate::services::gateway::MessageGateway;

pub fn notification_routes(gateway: Arc<MessageGateway>) -> Router {
    Router::new()
        .route("/send-message", post(handlers::send_message))
        .route("/webhook", post(handlers::inbound_webhook))
        .with_state(gateway)
}
