use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::ports::StoredFileInfo;
use crate::application::use_cases::{DriveFilesError, ManageDriveFilesUseCase};
use crate::presentation::http::dto::{ApiResponse, DriveListQueryDto, MessageResponseDto};

pub struct DriveHandler {
    manage_drive_files_use_case: Arc<ManageDriveFilesUseCase>,
}

fn error_status(error: &DriveFilesError) -> (StatusCode, &'static str) {
    match error {
        DriveFilesError::NotConfigured => (StatusCode::SERVICE_UNAVAILABLE, "DRIVE_NOT_CONFIGURED"),
        DriveFilesError::ValidationError(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
        DriveFilesError::StoreError(_) => (StatusCode::BAD_GATEWAY, "DRIVE_ERROR"),
        DriveFilesError::RepositoryError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_LOAD_FAILED")
        }
    }
}

impl DriveHandler {
    pub fn new(manage_drive_files_use_case: Arc<ManageDriveFilesUseCase>) -> Self {
        Self {
            manage_drive_files_use_case,
        }
    }

    pub async fn list_files(
        State(handler): State<Arc<DriveHandler>>,
        Query(query): Query<DriveListQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.manage_drive_files_use_case.list(query.page_size).await {
            Ok(files) => Ok((StatusCode::OK, Json(ApiResponse::success(files)))),
            Err(e) => {
                let (status, code) = error_status(&e);
                Ok((
                    status,
                    Json(ApiResponse::<Vec<StoredFileInfo>>::error(code, e.to_string(), None)),
                ))
            }
        }
    }

    pub async fn delete_file(
        State(handler): State<Arc<DriveHandler>>,
        Path(file_id): Path<String>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.manage_drive_files_use_case.delete(&file_id).await {
            Ok(()) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(MessageResponseDto {
                    message: format!("Arquivo {} removido", file_id),
                })),
            )),
            Err(e) => {
                let (status, code) = error_status(&e);
                Ok((status, Json(ApiResponse::error(code, e.to_string(), None))))
            }
        }
    }
}
