use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{Configuracao, ConfiguracaoSettings};
use crate::domain::value_objects::{LlmProvider, StorageProvider};
use crate::infrastructure::database::schema::configuracoes;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable, AsChangeset)]
#[diesel(table_name = configuracoes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ConfiguracaoModel {
    pub id: Uuid,
    pub llm_provider: String,
    pub storage_provider: String,
    pub google_model: String,
    pub openai_model: String,
    pub anthropic_model: String,
    pub google_drive_folder_id: Option<String>,
    pub aws_region: Option<String>,
    pub aws_bucket_name: Option<String>,
    pub logo_url: Option<String>,
    pub cor_primaria: Option<String>,
    pub chat_greeting: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Configuracao> for ConfiguracaoModel {
    fn from(config: &Configuracao) -> Self {
        let settings = config.settings().clone();
        Self {
            id: config.id(),
            llm_provider: settings.llm_provider.as_str().to_string(),
            storage_provider: settings.storage_provider.as_str().to_string(),
            google_model: settings.google_model,
            openai_model: settings.openai_model,
            anthropic_model: settings.anthropic_model,
            google_drive_folder_id: settings.google_drive_folder_id,
            aws_region: settings.aws_region,
            aws_bucket_name: settings.aws_bucket_name,
            logo_url: settings.logo_url,
            cor_primaria: settings.cor_primaria,
            chat_greeting: settings.chat_greeting,
            created_at: config.created_at(),
            updated_at: config.updated_at(),
        }
    }
}

impl TryFrom<ConfiguracaoModel> for Configuracao {
    type Error = String;

    fn try_from(model: ConfiguracaoModel) -> Result<Self, Self::Error> {
        let settings = ConfiguracaoSettings {
            llm_provider: LlmProvider::from_string(&model.llm_provider)?,
            storage_provider: StorageProvider::from_string(&model.storage_provider)?,
            google_model: model.google_model,
            openai_model: model.openai_model,
            anthropic_model: model.anthropic_model,
            google_drive_folder_id: model.google_drive_folder_id,
            aws_region: model.aws_region,
            aws_bucket_name: model.aws_bucket_name,
            logo_url: model.logo_url,
            cor_primaria: model.cor_primaria,
            chat_greeting: model.chat_greeting,
        };

        Ok(Configuracao::restore(
            model.id,
            settings,
            model.created_at,
            model.updated_at,
        ))
    }
}
