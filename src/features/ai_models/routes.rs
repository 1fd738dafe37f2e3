use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::ai_models::{handlers, services::AiModelService};

/// Create admin routes for AI model management
pub fn admin_routes(service: Arc<AiModelService>) -> Router {
    Router::new()
        .route(
            "/api/admin/ai-models",
            get(handlers::list_ai_models).post(handlers::create_ai_model),
        )
        .route(
            "/api/admin/ai-models/{id}",
            get(handlers::get_ai_model)
                .put(handlers::update_ai_model)
                .delete(handlers::delete_ai_model),
        )
        .with_state(service)
}
