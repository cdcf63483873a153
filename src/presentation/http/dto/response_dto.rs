use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::ProgressSnapshot;

/// Envelope wrapping every JSON body the API returns.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub timestamp: DateTime<Utc>,
}

/// `code` is a stable SCREAMING_SNAKE identifier such as `NOTA_NOT_FOUND`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
                details,
            }),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub upload_queue: ProgressSnapshot,
}

impl HealthResponseDto {
    pub fn healthy(upload_queue: ProgressSnapshot) -> Self {
        Self {
            service: env!("CARGO_PKG_NAME"),
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            upload_queue,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponseDto {
    pub message: String,
}
