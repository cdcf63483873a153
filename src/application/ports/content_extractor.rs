use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentExtractionError {
    #[error("Failed to fetch file: {0}")]
    FetchFailed(String),
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub status: ExtractionStatus,
    pub output: Value,
    pub details: Option<String>,
}

impl ExtractionResult {
    pub fn success(output: Value) -> Self {
        Self {
            status: ExtractionStatus::Success,
            output,
            details: None,
        }
    }

    pub fn error(details: impl Into<String>) -> Self {
        Self {
            status: ExtractionStatus::Error,
            output: Value::Null,
            details: Some(details.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExtractionStatus::Success
    }
}

/// Turns a stored file into raw structured output, guided by a JSON schema.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(
        &self,
        file_url: &str,
        schema: &Value,
    ) -> Result<ExtractionResult, ContentExtractionError>;
}
