use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::NotaHandler;

pub fn nota_routes(nota_handler: Arc<NotaHandler>) -> Router {
    Router::new()
        .route("/notas", get(NotaHandler::list_notas))
        .route("/notas/buscar", get(NotaHandler::search_notas))
        .route("/notas/{nota_id}", get(NotaHandler::get_nota))
        .route("/notas/{nota_id}", put(NotaHandler::update_nota))
        .route("/dashboard", get(NotaHandler::dashboard))
        .with_state(nota_handler)
}
