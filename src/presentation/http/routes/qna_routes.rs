use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::QnaHandler;

pub fn qna_routes(qna_handler: Arc<QnaHandler>) -> Router {
    Router::new()
        .route(
            "/api/questions",
            get(QnaHandler::list_questions).post(QnaHandler::create_question),
        )
        .route(
            "/api/questions/from-chat",
            post(QnaHandler::create_question_from_chat),
        )
        .route(
            "/api/questions/{id}",
            get(QnaHandler::get_question)
                .put(QnaHandler::update_question)
                .delete(QnaHandler::delete_question),
        )
        .route(
            "/api/questions/{id}/answers",
            post(QnaHandler::create_answer),
        )
        .route(
            "/api/answers/{id}",
            put(QnaHandler::update_answer).delete(QnaHandler::delete_answer),
        )
        .route(
            "/api/answers/{id}/like",
            get(QnaHandler::like_status).post(QnaHandler::toggle_like),
        )
        .with_state(qna_handler)
}
