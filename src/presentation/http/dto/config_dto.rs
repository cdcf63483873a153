use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::{ConfiguracaoView, SecretPresence};
use crate::domain::entities::{Configuracao, ConfiguracaoSettings};
use crate::domain::value_objects::{LlmProvider, StorageProvider};

#[derive(Debug, Serialize)]
pub struct ConfiguracaoResponseDto {
    /// Absent until the first save.
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub settings: ConfiguracaoSettings,
    pub secrets: SecretPresence,
    pub updated_at: Option<String>,
}

impl From<ConfiguracaoView> for ConfiguracaoResponseDto {
    fn from(view: ConfiguracaoView) -> Self {
        let persisted = view.persisted;
        Self {
            id: persisted.then(|| view.configuracao.id()),
            updated_at: persisted.then(|| view.configuracao.updated_at().to_rfc3339()),
            settings: view.configuracao.settings().clone(),
            secrets: view.secrets,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SavedConfiguracaoDto {
    pub id: Uuid,
    #[serde(flatten)]
    pub settings: ConfiguracaoSettings,
    pub updated_at: String,
}

impl From<Configuracao> for SavedConfiguracaoDto {
    fn from(config: Configuracao) -> Self {
        Self {
            id: config.id(),
            updated_at: config.updated_at().to_rfc3339(),
            settings: config.settings().clone(),
        }
    }
}

/// Body of `PUT /configuracao`. Omitted fields take their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveConfiguracaoDto {
    pub llm_provider: Option<LlmProvider>,
    pub storage_provider: Option<StorageProvider>,
    pub google_model: Option<String>,
    pub openai_model: Option<String>,
    pub anthropic_model: Option<String>,
    pub google_drive_folder_id: Option<String>,
    pub aws_region: Option<String>,
    pub aws_bucket_name: Option<String>,
    pub logo_url: Option<String>,
    pub cor_primaria: Option<String>,
    pub chat_greeting: Option<String>,
}

impl From<SaveConfiguracaoDto> for ConfiguracaoSettings {
    fn from(dto: SaveConfiguracaoDto) -> Self {
        let defaults = ConfiguracaoSettings::default();
        Self {
            llm_provider: dto.llm_provider.unwrap_or(defaults.llm_provider),
            storage_provider: dto.storage_provider.unwrap_or(defaults.storage_provider),
            google_model: dto.google_model.unwrap_or(defaults.google_model),
            openai_model: dto.openai_model.unwrap_or(defaults.openai_model),
            anthropic_model: dto.anthropic_model.unwrap_or(defaults.anthropic_model),
            google_drive_folder_id: dto.google_drive_folder_id,
            aws_region: dto.aws_region.or(defaults.aws_region),
            aws_bucket_name: dto.aws_bucket_name,
            logo_url: dto.logo_url,
            cor_primaria: dto.cor_primaria.or(defaults.cor_primaria),
            chat_greeting: dto.chat_greeting,
        }
    }
}
