use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::NotaTecnica;
use crate::domain::repositories::{NotaRepository, nota_repository::NotaRepositoryError};

#[derive(Debug, Error)]
pub enum GetNotaError {
    #[error("Nota not found: {0}")]
    NotFound(Uuid),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<NotaRepositoryError> for GetNotaError {
    fn from(error: NotaRepositoryError) -> Self {
        match error {
            NotaRepositoryError::NotFound(id) => GetNotaError::NotFound(id),
            other => GetNotaError::RepositoryError(other.to_string()),
        }
    }
}

pub struct GetNotaUseCase {
    nota_repository: Arc<dyn NotaRepository>,
}

impl GetNotaUseCase {
    pub fn new(nota_repository: Arc<dyn NotaRepository>) -> Self {
        Self { nota_repository }
    }

    pub async fn execute(&self, id: Uuid) -> Result<NotaTecnica, GetNotaError> {
        self.nota_repository
            .find_by_id(id)
            .await?
            .ok_or(GetNotaError::NotFound(id))
    }
}
