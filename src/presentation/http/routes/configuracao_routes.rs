use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ConfiguracaoHandler;

pub fn configuracao_routes(configuracao_handler: Arc<ConfiguracaoHandler>) -> Router {
    Router::new()
        .route("/configuracao", get(ConfiguracaoHandler::get_configuracao))
        .route("/configuracao", put(ConfiguracaoHandler::save_configuracao))
        .route(
            "/configuracao/testar",
            get(ConfiguracaoHandler::test_connections),
        )
        .with_state(configuracao_handler)
}
