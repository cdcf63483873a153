use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{NotaSort, NotaTecnica};
use crate::domain::value_objects::NotaTipo;

#[derive(Debug, Error)]
pub enum NotaRepositoryError {
    #[error("Nota not found: {0}")]
    NotFound(Uuid),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[async_trait]
pub trait NotaRepository: Send + Sync {
    async fn save(&self, nota: &NotaTecnica) -> Result<(), NotaRepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<NotaTecnica>, NotaRepositoryError>;
    async fn find_all(
        &self,
        sort: NotaSort,
        limit: i64,
    ) -> Result<Vec<NotaTecnica>, NotaRepositoryError>;
    async fn update(&self, nota: &NotaTecnica) -> Result<(), NotaRepositoryError>;
    async fn count(&self) -> Result<i64, NotaRepositoryError>;
    async fn count_by_tipo(&self, tipo: NotaTipo) -> Result<i64, NotaRepositoryError>;
    /// Notes whose `data_emissao` falls in `[from, until)`.
    async fn count_emitted_between(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<i64, NotaRepositoryError>;
    /// Every tag in use, sorted and deduplicated.
    async fn find_tags(&self) -> Result<Vec<String>, NotaRepositoryError>;
}
