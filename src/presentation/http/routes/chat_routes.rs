use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatHandler;

pub fn chat_routes(chat_handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route("/chat/greeting", get(ChatHandler::greeting))
        .route("/chat", post(ChatHandler::chat))
        .with_state(chat_handler)
}
