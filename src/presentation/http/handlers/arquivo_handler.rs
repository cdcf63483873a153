use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::ports::FileStoreError;
use crate::infrastructure::file_system::LocalFileStore;
use crate::presentation::http::dto::ApiResponse;

/// Serves back PDFs held by the local store.
pub struct ArquivoHandler {
    local_store: Arc<LocalFileStore>,
}

impl ArquivoHandler {
    pub fn new(local_store: Arc<LocalFileStore>) -> Self {
        Self { local_store }
    }

    pub async fn download(
        State(handler): State<Arc<ArquivoHandler>>,
        Path(file_id): Path<String>,
    ) -> Response {
        match handler.local_store.read(&file_id).await {
            Ok(bytes) => (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("inline; filename=\"{}\"", file_id),
                    ),
                ],
                bytes,
            )
                .into_response(),
            Err(e @ (FileStoreError::FileNotFound(_) | FileStoreError::InvalidPath(_))) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("FILE_NOT_FOUND", e.to_string(), None)),
            )
                .into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("FILE_READ_FAILED", e.to_string(), None)),
            )
                .into_response(),
        }
    }
}
