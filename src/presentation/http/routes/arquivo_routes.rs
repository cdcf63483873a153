use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::ArquivoHandler;

pub fn arquivo_routes(arquivo_handler: Arc<ArquivoHandler>) -> Router {
    Router::new()
        .route("/arquivos/{file_id}", get(ArquivoHandler::download))
        .with_state(arquivo_handler)
}
