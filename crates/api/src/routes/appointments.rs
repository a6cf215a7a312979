use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/book-appointment",
            post(handlers::appointments::book_appointment),
        )
        .route(
            "/api/appointments/:id",
            get(handlers::appointments::get_appointment),
        )
        .route(
            "/api/appointments/:id/status",
            patch(handlers::appointments::update_status),
        )
        .route(
            "/api/appointments/:id/reminder",
            post(handlers::appointments::send_reminder),
        )
}
