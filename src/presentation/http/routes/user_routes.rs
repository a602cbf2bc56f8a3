use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::UserHandler;

pub fn user_routes(user_handler: Arc<UserHandler>) -> Router {
    Router::new()
        .route("/api/users", post(UserHandler::create_user))
        .route("/api/users/rankings", get(UserHandler::rankings))
        .route("/api/users/{id}", get(UserHandler::get_user))
        .route("/api/users/{id}/points", post(UserHandler::award_points))
        .with_state(user_handler)
}
