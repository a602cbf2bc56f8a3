use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatHandler;

pub fn chat_routes(chat_handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route("/api/context", get(ChatHandler::build_context))
        .route("/api/chat", post(ChatHandler::chat))
        .route("/api/chat/suggestions", get(ChatHandler::suggested_questions))
        .route(
            "/api/chat/history",
            get(ChatHandler::list_history).delete(ChatHandler::clear_history),
        )
        .route(
            "/api/chat/history/{id}",
            delete(ChatHandler::delete_history_record),
        )
        .with_state(chat_handler)
}
