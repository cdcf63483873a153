use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::DashboardStats;
use crate::domain::entities::NotaTecnica;

#[derive(Debug, Serialize)]
pub struct NotaResponseDto {
    pub id: Uuid,
    pub numero: String,
    pub tipo: String,
    pub titulo: String,
    pub data_emissao: Option<String>,
    pub demanda: Option<String>,
    pub procedimento: Option<String>,
    pub representante_comarca: Option<String>,
    pub resumo: String,
    pub tags: Vec<String>,
    pub conteudo_extraido: String,
    pub arquivo_url: String,
    pub nome_arquivo: String,
    pub storage_provider: String,
    pub drive_file_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&NotaTecnica> for NotaResponseDto {
    fn from(nota: &NotaTecnica) -> Self {
        Self {
            id: nota.id(),
            numero: nota.numero().to_string(),
            tipo: nota.tipo().as_str().to_string(),
            titulo: nota.titulo().to_string(),
            data_emissao: nota.data_emissao().map(|d| d.format("%Y-%m-%d").to_string()),
            demanda: nota.demanda().map(str::to_string),
            procedimento: nota.procedimento().map(str::to_string),
            representante_comarca: nota.representante_comarca().map(str::to_string),
            resumo: nota.resumo().to_string(),
            tags: nota.tags().to_vec(),
            conteudo_extraido: nota.conteudo_extraido().to_string(),
            arquivo_url: nota.arquivo_url().to_string(),
            nome_arquivo: nota.nome_arquivo().to_string(),
            storage_provider: nota.storage_provider().as_str().to_string(),
            drive_file_id: nota.drive_file_id().map(str::to_string),
            created_at: nota.created_at().to_rfc3339(),
            updated_at: nota.updated_at().to_rfc3339(),
        }
    }
}

fn to_dtos(notas: &[NotaTecnica]) -> Vec<NotaResponseDto> {
    notas.iter().map(NotaResponseDto::from).collect()
}

#[derive(Debug, Deserialize)]
pub struct ListNotasQueryDto {
    pub q: Option<String>,
    pub tipo: Option<String>,
    pub sort: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Deserialize)]
pub struct SearchNotasQueryDto {
    pub q: Option<String>,
    /// Comma-separated.
    pub tags: Option<String>,
}

impl SearchNotasQueryDto {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct NotaListResponseDto {
    pub notas: Vec<NotaResponseDto>,
    pub total_count: usize,
}

impl NotaListResponseDto {
    pub fn new(notas: &[NotaTecnica], total_count: usize) -> Self {
        Self {
            notas: to_dtos(notas),
            total_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchNotasResponseDto {
    pub notas: Vec<NotaResponseDto>,
    pub available_tags: Vec<String>,
}

impl SearchNotasResponseDto {
    pub fn new(notas: &[NotaTecnica], available_tags: Vec<String>) -> Self {
        Self {
            notas: to_dtos(notas),
            available_tags,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponseDto {
    pub total: i64,
    pub processuais: i64,
    pub pre_processuais: i64,
    pub este_mes: i64,
    pub recentes: Vec<NotaResponseDto>,
    pub tags: Vec<String>,
}

impl From<DashboardStats> for DashboardResponseDto {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total: stats.total,
            processuais: stats.processuais,
            pre_processuais: stats.pre_processuais,
            este_mes: stats.este_mes,
            recentes: to_dtos(&stats.recentes),
            tags: stats.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_list_splits_and_trims() {
        let query = SearchNotasQueryDto {
            q: None,
            tags: Some(" diabetes, ,insulina ".to_string()),
        };
        assert_eq!(query.tag_list(), vec!["diabetes", "insulina"]);

        let empty = SearchNotasQueryDto { q: None, tags: None };
        assert!(empty.tag_list().is_empty());
    }
}
