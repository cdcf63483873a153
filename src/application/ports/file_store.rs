use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::value_objects::StorageProvider;

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Storage not configured: {0}")]
    NotConfigured(String),
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Storage API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// A file received from the client, before it is stored anywhere.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type
            .split(';')
            .next()
            .is_some_and(|m| m.trim().eq_ignore_ascii_case("application/pdf"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub file_id: String,
    pub file_url: String,
    pub provider: StorageProvider,
    /// Set by the pipeline when the selected store failed and the default one
    /// took the file.
    pub used_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredFileInfo {
    pub id: String,
    pub name: String,
    pub created_time: Option<DateTime<Utc>>,
    pub size: Option<u64>,
    pub web_view_link: Option<String>,
}

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload_file(&self, file: &UploadedFile) -> Result<StoredFile, FileStoreError>;

    async fn list_files(&self, page_size: u32) -> Result<Vec<StoredFileInfo>, FileStoreError>;

    async fn delete_file(&self, file_id: &str) -> Result<(), FileStoreError>;

    fn provider(&self) -> StorageProvider;
}
