use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::handlers::AppointmentCellState;
use appointment_cell::router::appointment_routes;
use directory_cell::router::directory_routes;
use notification_cell::router::notification_routes;
use notification_cell::MessageGateway;

pub fn create_router(
    appointment_state: Arc<AppointmentCellState>,
    gateway: Arc<MessageGateway>,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic Booking API is running!" }))
        .nest("/appointments", appointment_routes(appointment_state))
        .nest("/directory", directory_routes())
        .nest("/notifications", notification_routes(gateway))
}
