use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::KnowledgeHandler;

pub fn knowledge_routes(knowledge_handler: Arc<KnowledgeHandler>) -> Router {
    Router::new()
        .route(
            "/api/knowledge",
            get(KnowledgeHandler::list_knowledge).post(KnowledgeHandler::create_knowledge),
        )
        .route(
            "/api/knowledge/{id}",
            get(KnowledgeHandler::get_knowledge)
                .put(KnowledgeHandler::update_knowledge)
                .delete(KnowledgeHandler::delete_knowledge),
        )
        .route(
            "/api/knowledge/{id}/summary",
            get(KnowledgeHandler::summarize_knowledge),
        )
        .with_state(knowledge_handler)
}
