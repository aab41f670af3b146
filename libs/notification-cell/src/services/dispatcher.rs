// libs/notification-cell/src/services/dispatcher.rs
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::services::gateway::MessageGateway;

/// Producer handle for the notification worker.
///
/// Enqueueing never blocks the caller and never fails the surrounding
/// operation: delivery is best-effort by contract, so a lost worker is
/// logged and otherwise ignored.
#[derive(Clone)]
pub struct NotificationSender {
    tx: mpsc::UnboundedSender<String>,
}

impl NotificationSender {
    pub fn enqueue(&self, message: String) {
        if self.tx.send(message).is_err() {
            warn!("Notification dispatcher is gone; dropping message");
        }
    }

    /// Channel-backed sender for tests: messages land in the returned
    /// receiver instead of an HTTP gateway.
    pub fn capture() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

/// Spawn the background worker that drains queued messages into the
/// gateway. Failures are logged and swallowed; nothing is retried.
pub fn spawn_dispatcher(gateway: MessageGateway) -> NotificationSender {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match gateway.send_message(&message).await {
                Ok(response) => {
                    debug!("Notification delivered (id: {:?})", response.message_id);
                }
                Err(err) => {
                    warn!("Notification delivery failed: {}", err);
                }
            }
        }
    });

    NotificationSender { tx }
}
