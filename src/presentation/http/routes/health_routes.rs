use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use std::sync::Arc;

use crate::application::services::QueueProgress;
use crate::presentation::http::dto::{ApiResponse, HealthResponseDto};

/// Liveness routes. `/health` also reports whether an upload batch is running.
pub fn health_routes(queue: Arc<QueueProgress>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(queue)
}

async fn root_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success("NatJus Notas Técnicas")),
    )
}

async fn health_handler(State(queue): State<Arc<QueueProgress>>) -> impl IntoResponse {
    let health = HealthResponseDto::healthy(queue.snapshot());
    (StatusCode::OK, Json(ApiResponse::success(health)))
}
