use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{NotaDraft, NotaTecnica};
use crate::domain::value_objects::{NotaTipo, StorageProvider};
use crate::infrastructure::database::schema::notas_tecnicas;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = notas_tecnicas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NotaModel {
    pub id: Uuid,
    pub numero: String,
    pub tipo: String,
    pub titulo: String,
    pub data_emissao: Option<NaiveDate>,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&NotaTecnica> for NotaModel {
    fn from(nota: &NotaTecnica) -> Self {
        Self {
            id: nota.id(),
            numero: nota.numero().to_string(),
            tipo: nota.tipo().as_str().to_string(),
            titulo: nota.titulo().to_string(),
            data_emissao: nota.data_emissao(),
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
            created_at: nota.created_at(),
            updated_at: nota.updated_at(),
        }
    }
}

impl TryFrom<NotaModel> for NotaTecnica {
    type Error = String;

    fn try_from(model: NotaModel) -> Result<Self, Self::Error> {
        let draft = NotaDraft {
            numero: model.numero,
            tipo: NotaTipo::from_string(&model.tipo)?,
            titulo: model.titulo,
            data_emissao: model.data_emissao,
            demanda: model.demanda,
            procedimento: model.procedimento,
            representante_comarca: model.representante_comarca,
            resumo: model.resumo,
            tags: model.tags,
            conteudo_extraido: model.conteudo_extraido,
            arquivo_url: model.arquivo_url,
            nome_arquivo: model.nome_arquivo,
            storage_provider: StorageProvider::from_string(&model.storage_provider)?,
            drive_file_id: model.drive_file_id,
        };

        NotaTecnica::restore(model.id, draft, model.created_at, model.updated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_nota;

    #[test]
    fn test_model_round_trip_keeps_identity() {
        let nota = sample_nota("0042/2024", vec!["diabetes".to_string()]);
        let model = NotaModel::from(&nota);

        assert_eq!(model.tipo, "processual");
        assert_eq!(model.storage_provider, nota.storage_provider().as_str());

        let restored = NotaTecnica::try_from(model).unwrap();
        assert_eq!(restored, nota);
    }

    #[test]
    fn test_unknown_enum_values_are_rejected() {
        let mut model = NotaModel::from(&sample_nota("1/2024", vec![]));
        model.tipo = "administrativo".to_string();
        assert!(NotaTecnica::try_from(model).is_err());
    }
}
