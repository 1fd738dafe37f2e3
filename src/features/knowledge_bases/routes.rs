use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::features::knowledge_bases::{handlers, services::KnowledgeBaseService};

/// Create admin routes for knowledge bases and their documents
pub fn admin_routes(service: Arc<KnowledgeBaseService>) -> Router {
    Router::new()
        .route(
            "/api/admin/knowledge-bases",
            get(handlers::list_knowledge_bases).post(handlers::create_knowledge_base),
        )
        .route(
            "/api/admin/knowledge-bases/{id}",
            get(handlers::get_knowledge_base)
                .put(handlers::update_knowledge_base)
                .delete(handlers::delete_knowledge_base),
        )
        .route(
            "/api/admin/knowledge-bases/{id}/documents",
            get(handlers::list_documents).post(handlers::add_document),
        )
        .route(
            "/api/admin/knowledge-bases/{id}/documents/{document_id}",
            put(handlers::update_document).delete(handlers::delete_document),
        )
        .with_state(service)
}
