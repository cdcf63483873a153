use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate, Utc};
use thiserror::Error;

use crate::domain::entities::{NotaSort, NotaTecnica};
use crate::domain::repositories::{NotaRepository, nota_repository::NotaRepositoryError};
use crate::domain::value_objects::NotaTipo;

const RECENT_COUNT: i64 = 5;

#[derive(Debug, Error)]
pub enum DashboardStatsError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<NotaRepositoryError> for DashboardStatsError {
    fn from(error: NotaRepositoryError) -> Self {
        DashboardStatsError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub total: i64,
    pub processuais: i64,
    pub pre_processuais: i64,
    pub este_mes: i64,
    pub recentes: Vec<NotaTecnica>,
    pub tags: Vec<String>,
}

pub struct DashboardStatsUseCase {
    nota_repository: Arc<dyn NotaRepository>,
}

impl DashboardStatsUseCase {
    pub fn new(nota_repository: Arc<dyn NotaRepository>) -> Self {
        Self { nota_repository }
    }

    pub async fn execute(&self) -> Result<DashboardStats, DashboardStatsError> {
        self.execute_on(Utc::now().date_naive()).await
    }

    /// `today` decides which notes count as emitted this month.
    pub async fn execute_on(&self, today: NaiveDate) -> Result<DashboardStats, DashboardStatsError> {
        let (from, until) = month_bounds(today);
        let repo = &self.nota_repository;
        let total = repo.count().await?;
        let processuais = repo.count_by_tipo(NotaTipo::Processual).await?;
        let pre_processuais = repo.count_by_tipo(NotaTipo::PreProcessual).await?;
        let este_mes = repo.count_emitted_between(from, until).await?;
        let recentes = repo.find_all(NotaSort::DataEmissao, RECENT_COUNT).await?;
        let tags = repo.find_tags().await?;

        Ok(DashboardStats {
            total,
            processuais,
            pre_processuais,
            este_mes,
            recentes,
            tags,
        })
    }
}

/// First day of `today`'s month and first day of the next one.
fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from = today.with_day(1).unwrap_or(today);
    let until = from.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX);
    (from, until)
}
