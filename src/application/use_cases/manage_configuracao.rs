use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::application::ports::GenerationOptions;
use crate::application::services::{
    ConfigSnapshot, CredentialStatus, ProviderRegistry, ProviderSecrets,
};
use crate::domain::entities::{Configuracao, ConfiguracaoSettings};
use crate::domain::repositories::{
    ConfiguracaoRepository, configuracao_repository::ConfiguracaoRepositoryError,
};
use crate::domain::value_objects::LlmProvider;

const CONNECTION_TEST_PROMPT: &str = "Teste de conexão. Responda apenas \"OK\"";

#[derive(Debug, Error)]
pub enum ConfiguracaoError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<ConfiguracaoRepositoryError> for ConfiguracaoError {
    fn from(error: ConfiguracaoRepositoryError) -> Self {
        ConfiguracaoError::RepositoryError(error.to_string())
    }
}

/// Which secrets the environment provides. Values are never exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretPresence {
    pub has_google_api_key: bool,
    pub has_openai_api_key: bool,
    pub has_anthropic_api_key: bool,
    pub has_drive_credentials: bool,
}

#[derive(Debug, Clone)]
pub struct ConfiguracaoView {
    pub configuracao: Configuracao,
    /// False until the first save.
    pub persisted: bool,
    pub secrets: SecretPresence,
}

fn presence(secrets: &ProviderSecrets, registry: &ProviderRegistry) -> SecretPresence {
    SecretPresence {
        has_google_api_key: secrets.api_key_for(LlmProvider::Google).is_some(),
        has_openai_api_key: secrets.api_key_for(LlmProvider::OpenAi).is_some(),
        has_anthropic_api_key: secrets.api_key_for(LlmProvider::Anthropic).is_some(),
        has_drive_credentials: registry.drive_credentials() == CredentialStatus::Valid,
    }
}

pub struct GetConfiguracaoUseCase {
    configuracao_repository: Arc<dyn ConfiguracaoRepository>,
    registry: Arc<ProviderRegistry>,
    secrets: ProviderSecrets,
}

impl GetConfiguracaoUseCase {
    pub fn new(
        configuracao_repository: Arc<dyn ConfiguracaoRepository>,
        registry: Arc<ProviderRegistry>,
        secrets: ProviderSecrets,
    ) -> Self {
        Self {
            configuracao_repository,
            registry,
            secrets,
        }
    }

    pub async fn execute(&self) -> Result<ConfiguracaoView, ConfiguracaoError> {
        let stored = self.configuracao_repository.find_first().await?;
        Ok(ConfiguracaoView {
            persisted: stored.is_some(),
            configuracao: stored.unwrap_or_default(),
            secrets: presence(&self.secrets, &self.registry),
        })
    }
}

pub struct SaveConfiguracaoUseCase {
    configuracao_repository: Arc<dyn ConfiguracaoRepository>,
}

impl SaveConfiguracaoUseCase {
    pub fn new(configuracao_repository: Arc<dyn ConfiguracaoRepository>) -> Self {
        Self {
            configuracao_repository,
        }
    }

    /// Creates the row on first save, then updates it in place.
    pub async fn execute(
        &self,
        settings: ConfiguracaoSettings,
    ) -> Result<Configuracao, ConfiguracaoError> {
        let config = match self.configuracao_repository.find_first().await? {
            Some(mut existing) => {
                existing.replace_settings(settings);
                existing
            }
            None => Configuracao::new(settings),
        };

        self.configuracao_repository.save(&config).await?;
        tracing::info!("Configurações salvas ({})", config.id());
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Success,
    Error,
    ErrorNoKey,
    ErrorNoConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionCheck {
    pub status: ConnectionStatus,
    pub details: Option<String>,
}

impl ConnectionCheck {
    fn new(status: ConnectionStatus, details: Option<String>) -> Self {
        Self { status, details }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionReport {
    pub gemini: ConnectionCheck,
    pub google_drive: ConnectionCheck,
}

pub struct TestConnectionsUseCase {
    configuracao_repository: Arc<dyn ConfiguracaoRepository>,
    registry: Arc<ProviderRegistry>,
    secrets: ProviderSecrets,
}

impl TestConnectionsUseCase {
    pub fn new(
        configuracao_repository: Arc<dyn ConfiguracaoRepository>,
        registry: Arc<ProviderRegistry>,
        secrets: ProviderSecrets,
    ) -> Self {
        Self {
            configuracao_repository,
            registry,
            secrets,
        }
    }

    pub async fn execute(&self) -> Result<ConnectionReport, ConfiguracaoError> {
        let configuracao = self
            .configuracao_repository
            .find_first()
            .await?
            .unwrap_or_default();
        let snapshot = ConfigSnapshot::new(configuracao, self.secrets.clone());

        Ok(ConnectionReport {
            gemini: self.check_gemini(&snapshot).await,
            google_drive: self.check_drive(&snapshot),
        })
    }

    async fn check_gemini(&self, snapshot: &ConfigSnapshot) -> ConnectionCheck {
        let Some(gemini) = self.registry.gemini(snapshot) else {
            return ConnectionCheck::new(ConnectionStatus::ErrorNoKey, None);
        };

        let options = GenerationOptions::default().with_max_output_tokens(16);
        match gemini.generate_content(CONNECTION_TEST_PROMPT, options).await {
            Ok(_) => ConnectionCheck::new(ConnectionStatus::Success, None),
            Err(e) => {
                tracing::warn!("Teste de conexão com Gemini falhou: {}", e);
                ConnectionCheck::new(ConnectionStatus::Error, Some(e.to_string()))
            }
        }
    }

    fn check_drive(&self, snapshot: &ConfigSnapshot) -> ConnectionCheck {
        match (self.registry.drive_credentials(), snapshot.drive_folder_id()) {
            (CredentialStatus::Missing, _) | (_, None) => {
                ConnectionCheck::new(ConnectionStatus::ErrorNoConfig, None)
            }
            (CredentialStatus::Invalid(reason), Some(_)) => {
                ConnectionCheck::new(ConnectionStatus::Error, Some(reason))
            }
            (CredentialStatus::Valid, Some(_)) => {
                ConnectionCheck::new(ConnectionStatus::Success, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::TextGenerationError;
    use crate::domain::value_objects::StorageProvider;
    use crate::test_support::{
        FakeConfiguracaoRepository, FakeGenerator, FakeProviderFactory, FakeStore,
    };

    fn registry(factory: FakeProviderFactory) -> Arc<ProviderRegistry> {
        Arc::new(ProviderRegistry::new(
            Arc::new(FakeStore::new(StorageProvider::Base44)),
            Arc::new(FakeGenerator::text("Base44", "OK")),
            Arc::new(factory),
        ))
    }

    #[tokio::test]
    async fn test_save_creates_then_updates() {
        let repo = Arc::new(FakeConfiguracaoRepository::new());
        let use_case = SaveConfiguracaoUseCase::new(repo.clone());

        let first = use_case
            .execute(ConfiguracaoSettings::default())
            .await
            .unwrap();
        let second = use_case
            .execute(ConfiguracaoSettings {
                llm_provider: LlmProvider::Google,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(first.id(), second.id());
        assert_eq!(repo.saves(), 2);
        let stored = repo.current().unwrap();
        assert_eq!(stored.llm_provider(), LlmProvider::Google);
    }

    #[tokio::test]
    async fn test_get_reports_presence_only() {
        let secrets = ProviderSecrets {
            openai_api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let use_case = GetConfiguracaoUseCase::new(
            Arc::new(FakeConfiguracaoRepository::new()),
            registry(FakeProviderFactory::new(true)),
            secrets,
        );

        let view = use_case.execute().await.unwrap();

        assert!(!view.persisted);
        assert!(view.secrets.has_openai_api_key);
        assert!(!view.secrets.has_google_api_key);
        assert!(view.secrets.has_drive_credentials);
    }

    #[tokio::test]
    async fn test_connection_checks() {
        let repo = Arc::new(FakeConfiguracaoRepository::with(Configuracao::new(
            ConfiguracaoSettings {
                google_drive_folder_id: Some("pasta".to_string()),
                ..Default::default()
            },
        )));

        let no_key = TestConnectionsUseCase::new(
            repo.clone(),
            registry(FakeProviderFactory::new(true)),
            ProviderSecrets::default(),
        );
        let report = no_key.execute().await.unwrap();
        assert_eq!(report.gemini.status, ConnectionStatus::ErrorNoKey);
        assert_eq!(report.google_drive.status, ConnectionStatus::Success);

        let secrets = ProviderSecrets {
            google_api_key: Some("chave".to_string()),
            ..Default::default()
        };
        let failing = TestConnectionsUseCase::new(
            repo,
            registry(
                FakeProviderFactory::new(false).with_gemini(FakeGenerator::failing(
                    "Gemini",
                    TextGenerationError::ApiError {
                        provider: "Gemini".to_string(),
                        status: 403,
                        message: "API key not valid".to_string(),
                    },
                )),
            ),
            secrets,
        );
        let report = failing.execute().await.unwrap();
        assert_eq!(report.gemini.status, ConnectionStatus::Error);
        assert!(report.gemini.details.unwrap().contains("403"));
        assert_eq!(report.google_drive.status, ConnectionStatus::ErrorNoConfig);
    }
}
