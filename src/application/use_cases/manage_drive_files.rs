use std::sync::Arc;

use thiserror::Error;

use crate::application::ports::{FileStore, FileStoreError, StoredFileInfo};
use crate::application::services::{ConfigSnapshot, ProviderRegistry, ProviderSecrets};
use crate::domain::repositories::{
    ConfiguracaoRepository, configuracao_repository::ConfiguracaoRepositoryError,
};

const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Error)]
pub enum DriveFilesError {
    #[error("Google Drive não configurado")]
    NotConfigured,
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Drive error: {0}")]
    StoreError(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<FileStoreError> for DriveFilesError {
    fn from(error: FileStoreError) -> Self {
        DriveFilesError::StoreError(error.to_string())
    }
}

impl From<ConfiguracaoRepositoryError> for DriveFilesError {
    fn from(error: ConfiguracaoRepositoryError) -> Self {
        DriveFilesError::RepositoryError(error.to_string())
    }
}

/// Administration of the files held in the configured Drive folder.
pub struct ManageDriveFilesUseCase {
    registry: Arc<ProviderRegistry>,
    configuracao_repository: Arc<dyn ConfiguracaoRepository>,
    secrets: ProviderSecrets,
}

impl ManageDriveFilesUseCase {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        configuracao_repository: Arc<dyn ConfiguracaoRepository>,
        secrets: ProviderSecrets,
    ) -> Self {
        Self {
            registry,
            configuracao_repository,
            secrets,
        }
    }

    async fn drive(&self) -> Result<Arc<dyn FileStore>, DriveFilesError> {
        let configuracao = self
            .configuracao_repository
            .find_first()
            .await?
            .unwrap_or_default();
        let snapshot = ConfigSnapshot::new(configuracao, self.secrets.clone());
        self.registry
            .drive_store(&snapshot)
            .ok_or(DriveFilesError::NotConfigured)
    }

    pub async fn list(&self, page_size: u32) -> Result<Vec<StoredFileInfo>, DriveFilesError> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(DriveFilesError::ValidationError(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(self.drive().await?.list_files(page_size).await?)
    }

    pub async fn delete(&self, file_id: &str) -> Result<(), DriveFilesError> {
        if file_id.trim().is_empty() {
            return Err(DriveFilesError::ValidationError(
                "file_id cannot be empty".to_string(),
            ));
        }
        self.drive().await?.delete_file(file_id).await?;
        tracing::info!("Arquivo {} removido do Google Drive", file_id);
        Ok(())
    }
}
