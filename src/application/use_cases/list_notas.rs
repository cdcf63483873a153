use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::{NotaQuery, NotaSort, NotaTecnica, SearchScope, TipoFilter};
use crate::domain::repositories::{NotaRepository, nota_repository::NotaRepositoryError};

#[derive(Debug, Error)]
pub enum ListNotasError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<NotaRepositoryError> for ListNotasError {
    fn from(error: NotaRepositoryError) -> Self {
        ListNotasError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ListNotasRequest {
    pub term: Option<String>,
    pub tipo: TipoFilter,
    pub sort: NotaSort,
    pub limit: i64,
}

impl Default for ListNotasRequest {
    fn default() -> Self {
        Self {
            term: None,
            tipo: TipoFilter::Todos,
            sort: NotaSort::DataEmissao,
            limit: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListNotasResponse {
    pub notas: Vec<NotaTecnica>,
    pub total_count: usize,
}

/// Library view: catalog search over the most recent notes.
pub struct ListNotasUseCase {
    nota_repository: Arc<dyn NotaRepository>,
}

impl ListNotasUseCase {
    pub fn new(nota_repository: Arc<dyn NotaRepository>) -> Self {
        Self { nota_repository }
    }

    pub async fn execute(
        &self,
        request: ListNotasRequest,
    ) -> Result<ListNotasResponse, ListNotasError> {
        if request.limit <= 0 || request.limit > 1000 {
            return Err(ListNotasError::ValidationError(
                "Limit must be between 1 and 1000".to_string(),
            ));
        }

        let notas = self
            .nota_repository
            .find_all(request.sort, request.limit)
            .await?;

        let query = NotaQuery {
            term: request.term,
            scope: SearchScope::Catalog,
            tipo: request.tipo,
            tags: Vec::new(),
        };
        let notas = query.apply(notas);

        Ok(ListNotasResponse {
            total_count: notas.len(),
            notas,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::NotaTipo;
    use crate::test_support::{FakeNotaRepository, sample_nota};

    #[tokio::test]
    async fn test_filters_by_term_and_tipo() {
        let repo = Arc::new(FakeNotaRepository::new());
        repo.insert(sample_nota("1/2024", vec![]));
        repo.insert(sample_nota("2/2024", vec![]));
        let use_case = ListNotasUseCase::new(repo);

        let response = use_case
            .execute(ListNotasRequest {
                term: Some("2/2024".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(response.total_count, 1);
        assert_eq!(response.notas[0].numero(), "2/2024");

        let response = use_case
            .execute(ListNotasRequest {
                tipo: TipoFilter::Only(NotaTipo::PreProcessual),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(response.total_count, 0);
    }

    #[tokio::test]
    async fn test_rejects_bad_limit() {
        let use_case = ListNotasUseCase::new(Arc::new(FakeNotaRepository::new()));
        let err = use_case
            .execute(ListNotasRequest {
                limit: 0,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ListNotasError::ValidationError(_)));
    }
}
