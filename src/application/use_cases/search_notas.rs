use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::{
    NotaQuery, NotaSort, NotaTecnica, SearchScope, TipoFilter, distinct_tags,
};
use crate::domain::repositories::{NotaRepository, nota_repository::NotaRepositoryError};

const SEARCH_SCAN_LIMIT: i64 = 1000;

#[derive(Debug, Error)]
pub enum SearchNotasError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<NotaRepositoryError> for SearchNotasError {
    fn from(error: NotaRepositoryError) -> Self {
        SearchNotasError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchNotasRequest {
    pub term: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SearchNotasResponse {
    pub notas: Vec<NotaTecnica>,
    pub available_tags: Vec<String>,
}

pub struct SearchNotasUseCase {
    nota_repository: Arc<dyn NotaRepository>,
}

impl SearchNotasUseCase {
    pub fn new(nota_repository: Arc<dyn NotaRepository>) -> Self {
        Self { nota_repository }
    }

    pub async fn execute(
        &self,
        request: SearchNotasRequest,
    ) -> Result<SearchNotasResponse, SearchNotasError> {
        let notas = self
            .nota_repository
            .find_all(NotaSort::DataEmissao, SEARCH_SCAN_LIMIT)
            .await?;

        // Tag list covers every note, not only the matches.
        let available_tags = distinct_tags(&notas);

        let query = NotaQuery {
            term: request.term,
            scope: SearchScope::FullText,
            tipo: TipoFilter::Todos,
            tags: request.tags,
        };

        Ok(SearchNotasResponse {
            notas: query.apply(notas),
            available_tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeNotaRepository, sample_nota};

    #[tokio::test]
    async fn test_search_by_tags_and_content() {
        let repo = Arc::new(FakeNotaRepository::new());
        repo.insert(sample_nota("1/2024", vec!["sus".to_string()]));
        repo.insert(sample_nota("2/2024", vec!["oncologia".to_string(), "alto custo".to_string()]));
        let use_case = SearchNotasUseCase::new(repo);

        let response = use_case
            .execute(SearchNotasRequest {
                term: None,
                tags: vec!["oncologia".to_string(), "inexistente".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(response.notas.len(), 1);
        assert_eq!(response.notas[0].numero(), "2/2024");
        assert_eq!(response.available_tags, vec!["alto custo", "oncologia", "sus"]);

        let response = use_case
            .execute(SearchNotasRequest {
                term: Some("INSULINA".to_string()),
                tags: vec![],
            })
            .await
            .unwrap();
        assert_eq!(response.notas.len(), 2);
    }
}
