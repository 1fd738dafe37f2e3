use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::responses::{handlers, services::ResponseService};

/// Guest-facing chat routes
pub fn public_routes(service: Arc<ResponseService>) -> Router {
    Router::new()
        .route("/api/chat/respond", post(handlers::respond))
        .route(
            "/api/chat/follow-ups/{id}/respond",
            post(handlers::respond_to_follow_up),
        )
        .with_state(service)
}
