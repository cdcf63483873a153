use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::Configuracao;

#[derive(Debug, Error)]
pub enum ConfiguracaoRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// At most one configuration row exists.
#[async_trait]
pub trait ConfiguracaoRepository: Send + Sync {
    async fn find_first(&self) -> Result<Option<Configuracao>, ConfiguracaoRepositoryError>;
    /// Inserts the row if it is new, otherwise updates it in place.
    async fn save(&self, config: &Configuracao) -> Result<(), ConfiguracaoRepositoryError>;
}
