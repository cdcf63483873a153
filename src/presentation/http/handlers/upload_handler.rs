use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::ports::UploadedFile;
use crate::application::services::QueueProgress;
use crate::application::use_cases::{
    ProcessUploadQueueError, ProcessUploadQueueRequest, ProcessUploadQueueUseCase, QueueReport,
};
use crate::presentation::http::dto::ApiResponse;

const FILE_FIELD: &str = "file";

pub struct UploadHandler {
    process_upload_queue_use_case: Arc<ProcessUploadQueueUseCase>,
}

impl UploadHandler {
    pub fn new(process_upload_queue_use_case: Arc<ProcessUploadQueueUseCase>) -> Self {
        Self {
            process_upload_queue_use_case,
        }
    }

    /// Reads every `file` field, then runs the whole batch through the queue.
    pub async fn upload_notas(
        State(handler): State<Arc<UploadHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        let mut files = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let file_name = field
                .file_name()
                .ok_or(StatusCode::BAD_REQUEST)?
                .to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| StatusCode::BAD_REQUEST)?
                .to_vec();

            files.push(UploadedFile::new(file_name, data, content_type));
        }

        let request = ProcessUploadQueueRequest { files };
        match handler.process_upload_queue_use_case.execute(request).await {
            Ok(report) => Ok((StatusCode::OK, Json(ApiResponse::success(report)))),
            Err(ProcessUploadQueueError::ValidationError(message)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<QueueReport>::error("UPLOAD_REJECTED", message, None)),
            )),
            Err(e @ ProcessUploadQueueError::QueueBusy) => Ok((
                StatusCode::CONFLICT,
                Json(ApiResponse::error("QUEUE_BUSY", e.to_string(), None)),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("UPLOAD_FAILED", e.to_string(), None)),
            )),
        }
    }

    pub fn queue_progress(&self) -> Arc<QueueProgress> {
        self.process_upload_queue_use_case.progress()
    }

    pub async fn progress(State(handler): State<Arc<UploadHandler>>) -> impl IntoResponse {
        let snapshot = handler.queue_progress().snapshot();
        (StatusCode::OK, Json(ApiResponse::success(snapshot)))
    }
}
