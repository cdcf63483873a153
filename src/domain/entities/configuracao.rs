use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{LlmProvider, StorageProvider};

pub const DEFAULT_GOOGLE_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_COR_PRIMARIA: &str = "#2563EB";
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Editable settings of the single configuration row. Secrets live in the
/// environment, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguracaoSettings {
    pub llm_provider: LlmProvider,
    pub storage_provider: StorageProvider,
    pub google_model: String,
    pub openai_model: String,
    pub anthropic_model: String,
    pub google_drive_folder_id: Option<String>,
    pub aws_region: Option<String>,
    pub aws_bucket_name: Option<String>,
    pub logo_url: Option<String>,
    pub cor_primaria: Option<String>,
    pub chat_greeting: Option<String>,
}

impl Default for ConfiguracaoSettings {
    fn default() -> Self {
        Self {
            llm_provider: LlmProvider::default(),
            storage_provider: StorageProvider::default(),
            google_model: DEFAULT_GOOGLE_MODEL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            google_drive_folder_id: None,
            aws_region: Some(DEFAULT_AWS_REGION.to_string()),
            aws_bucket_name: None,
            logo_url: None,
            cor_primaria: Some(DEFAULT_COR_PRIMARIA.to_string()),
            chat_greeting: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuracao {
    id: Uuid,
    settings: ConfiguracaoSettings,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Configuracao {
    pub fn new(settings: ConfiguracaoSettings) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            settings: normalize(settings),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn restore(
        id: Uuid,
        settings: ConfiguracaoSettings,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            settings,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn settings(&self) -> &ConfiguracaoSettings {
        &self.settings
    }

    pub fn llm_provider(&self) -> LlmProvider {
        self.settings.llm_provider
    }

    pub fn storage_provider(&self) -> StorageProvider {
        self.settings.storage_provider
    }

    /// Model name for the selected LLM provider, as shown in tagged prompts.
    pub fn active_model(&self) -> &str {
        match self.settings.llm_provider {
            LlmProvider::Google => &self.settings.google_model,
            LlmProvider::OpenAi => &self.settings.openai_model,
            LlmProvider::Anthropic => &self.settings.anthropic_model,
            LlmProvider::Base44 => "",
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the settings in place, keeping the row identity.
    pub fn replace_settings(&mut self, settings: ConfiguracaoSettings) {
        self.settings = normalize(settings);
        self.updated_at = Utc::now();
    }
}

impl Default for Configuracao {
    fn default() -> Self {
        Self::new(ConfiguracaoSettings::default())
    }
}

fn normalize(mut settings: ConfiguracaoSettings) -> ConfiguracaoSettings {
    fn blank_to_none(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    if settings.google_model.trim().is_empty() {
        settings.google_model = DEFAULT_GOOGLE_MODEL.to_string();
    }
    if settings.openai_model.trim().is_empty() {
        settings.openai_model = DEFAULT_OPENAI_MODEL.to_string();
    }
    if settings.anthropic_model.trim().is_empty() {
        settings.anthropic_model = DEFAULT_ANTHROPIC_MODEL.to_string();
    }
    settings.google_drive_folder_id = blank_to_none(settings.google_drive_folder_id);
    settings.aws_region = blank_to_none(settings.aws_region);
    settings.aws_bucket_name = blank_to_none(settings.aws_bucket_name);
    settings.logo_url = blank_to_none(settings.logo_url);
    settings.cor_primaria = blank_to_none(settings.cor_primaria);
    settings.chat_greeting = blank_to_none(settings.chat_greeting);
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_base44() {
        let config = Configuracao::default();

        assert_eq!(config.llm_provider(), LlmProvider::Base44);
        assert_eq!(config.storage_provider(), StorageProvider::Base44);
        assert_eq!(config.settings().google_model, DEFAULT_GOOGLE_MODEL);
    }

    #[test]
    fn test_active_model_follows_provider() {
        let config = Configuracao::new(ConfiguracaoSettings {
            llm_provider: LlmProvider::Anthropic,
            anthropic_model: "claude-3-opus".to_string(),
            ..Default::default()
        });
        assert_eq!(config.active_model(), "claude-3-opus");
    }

    #[test]
    fn test_replace_settings_keeps_identity() {
        let mut config = Configuracao::default();
        let id = config.id();

        config.replace_settings(ConfiguracaoSettings {
            storage_provider: StorageProvider::GoogleDrive,
            google_drive_folder_id: Some("  ".to_string()),
            google_model: String::new(),
            ..Default::default()
        });

        assert_eq!(config.id(), id);
        assert_eq!(config.storage_provider(), StorageProvider::GoogleDrive);
        assert_eq!(config.settings().google_drive_folder_id, None);
        assert_eq!(config.settings().google_model, DEFAULT_GOOGLE_MODEL);
    }
}
