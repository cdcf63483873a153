use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::UploadHandler;

pub fn upload_routes(upload_handler: Arc<UploadHandler>) -> Router {
    Router::new()
        .route("/notas/upload", post(UploadHandler::upload_notas))
        .route("/notas/upload/progress", get(UploadHandler::progress))
        .with_state(upload_handler)
}
