use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::features::follow_up_questions::{handlers, services::FollowUpQuestionService};

/// Create admin routes for follow-up questions
pub fn admin_routes(service: Arc<FollowUpQuestionService>) -> Router {
    Router::new()
        .route(
            "/api/admin/prompts/{id}/follow-up-questions",
            get(handlers::list_follow_up_questions).post(handlers::create_follow_up_question),
        )
        .route(
            "/api/admin/follow-up-questions/{id}",
            put(handlers::update_follow_up_question).delete(handlers::delete_follow_up_question),
        )
        .with_state(service)
}
