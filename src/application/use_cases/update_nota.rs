use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{NotaTecnica, NotaUpdate};
use crate::domain::repositories::{NotaRepository, nota_repository::NotaRepositoryError};

#[derive(Debug, Error)]
pub enum UpdateNotaError {
    #[error("Nota not found: {0}")]
    NotFound(Uuid),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<NotaRepositoryError> for UpdateNotaError {
    fn from(error: NotaRepositoryError) -> Self {
        match error {
            NotaRepositoryError::NotFound(id) => UpdateNotaError::NotFound(id),
            NotaRepositoryError::ValidationError(msg) => UpdateNotaError::ValidationError(msg),
            other => UpdateNotaError::RepositoryError(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateNotaRequest {
    pub id: Uuid,
    pub changes: NotaUpdate,
}

/// Review-step edit. Only the fields present in the request change.
pub struct UpdateNotaUseCase {
    nota_repository: Arc<dyn NotaRepository>,
}

impl UpdateNotaUseCase {
    pub fn new(nota_repository: Arc<dyn NotaRepository>) -> Self {
        Self { nota_repository }
    }

    pub async fn execute(&self, request: UpdateNotaRequest) -> Result<NotaTecnica, UpdateNotaError> {
        let mut nota = self
            .nota_repository
            .find_by_id(request.id)
            .await?
            .ok_or(UpdateNotaError::NotFound(request.id))?;

        nota.apply_update(request.changes)
            .map_err(UpdateNotaError::ValidationError)?;

        self.nota_repository.update(&nota).await?;
        tracing::info!("Nota {} atualizada", nota.id());
        Ok(nota)
    }
}
