use std::sync::Arc;

use crate::application::ports::{FileStore, TextGenerator};
use crate::application::services::TaggedGenerator;
use crate::domain::entities::Configuracao;
use crate::domain::value_objects::{LlmProvider, StorageProvider};

/// Credentials and environment fallbacks. Never persisted, never serialized.
#[derive(Clone, Default)]
pub struct ProviderSecrets {
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub default_drive_folder_id: Option<String>,
}

impl ProviderSecrets {
    pub fn api_key_for(&self, provider: LlmProvider) -> Option<&str> {
        let key = match provider {
            LlmProvider::Google => self.google_api_key.as_deref(),
            LlmProvider::OpenAi => self.openai_api_key.as_deref(),
            LlmProvider::Anthropic => self.anthropic_api_key.as_deref(),
            LlmProvider::Base44 => None,
        };
        key.filter(|k| !k.trim().is_empty())
    }
}

impl std::fmt::Debug for ProviderSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSecrets")
            .field("google_api_key", &self.google_api_key.is_some())
            .field("openai_api_key", &self.openai_api_key.is_some())
            .field("anthropic_api_key", &self.anthropic_api_key.is_some())
            .field("default_drive_folder_id", &self.default_drive_folder_id)
            .finish()
    }
}

/// Configuration frozen at the start of a queue run or a chat request.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    pub configuracao: Configuracao,
    pub secrets: ProviderSecrets,
}

impl ConfigSnapshot {
    pub fn new(configuracao: Configuracao, secrets: ProviderSecrets) -> Self {
        Self {
            configuracao,
            secrets,
        }
    }

    pub fn drive_folder_id(&self) -> Option<&str> {
        self.configuracao
            .settings()
            .google_drive_folder_id
            .as_deref()
            .or(self.secrets.default_drive_folder_id.as_deref())
            .filter(|f| !f.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CredentialStatus {
    Missing,
    Invalid(String),
    Valid,
}

/// Builds the providers that need per-snapshot parameters.
pub trait ProviderFactory: Send + Sync {
    fn gemini(&self, api_key: &str, model: &str) -> Arc<dyn TextGenerator>;

    /// `None` when no service-account credentials are available.
    fn drive(&self, folder_id: &str) -> Option<Arc<dyn FileStore>>;

    fn drive_credentials(&self) -> CredentialStatus;
}

#[derive(Clone)]
pub enum StorageSelection {
    Direct(Arc<dyn FileStore>),
    WithFallback {
        primary: Arc<dyn FileStore>,
        fallback: Arc<dyn FileStore>,
    },
    /// The selected store cannot be used; every file goes to the fallback.
    FallbackOnly {
        fallback: Arc<dyn FileStore>,
        reason: String,
    },
}

#[derive(Clone)]
pub enum LlmSelection {
    Direct(Arc<dyn TextGenerator>),
    Gemini {
        primary: Arc<dyn TextGenerator>,
        fallback: Arc<dyn TextGenerator>,
    },
    Misconfigured(String),
}

#[derive(Clone)]
pub struct ResolvedProviders {
    pub storage_provider: StorageProvider,
    pub llm_provider: LlmProvider,
    pub storage: StorageSelection,
    pub llm: LlmSelection,
}

pub fn configuration_error_message(provider: LlmProvider) -> String {
    format!(
        "Erro: Chave API do {} não configurada. Verifique as configurações.",
        provider.display_name()
    )
}

pub struct ProviderRegistry {
    default_store: Arc<dyn FileStore>,
    default_llm: Arc<dyn TextGenerator>,
    factory: Arc<dyn ProviderFactory>,
}

impl ProviderRegistry {
    pub fn new(
        default_store: Arc<dyn FileStore>,
        default_llm: Arc<dyn TextGenerator>,
        factory: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            default_store,
            default_llm,
            factory,
        }
    }

    pub fn default_store(&self) -> Arc<dyn FileStore> {
        self.default_store.clone()
    }

    pub fn default_llm(&self) -> Arc<dyn TextGenerator> {
        self.default_llm.clone()
    }

    pub fn drive_credentials(&self) -> CredentialStatus {
        self.factory.drive_credentials()
    }

    /// Drive client for the snapshot's folder, if credentials and folder exist.
    pub fn drive_store(&self, snapshot: &ConfigSnapshot) -> Option<Arc<dyn FileStore>> {
        snapshot
            .drive_folder_id()
            .and_then(|folder| self.factory.drive(folder))
    }

    /// Gemini client when a Google key is configured, whatever the active provider.
    pub fn gemini(&self, snapshot: &ConfigSnapshot) -> Option<Arc<dyn TextGenerator>> {
        snapshot
            .secrets
            .api_key_for(LlmProvider::Google)
            .map(|key| {
                self.factory
                    .gemini(key, &snapshot.configuracao.settings().google_model)
            })
    }

    pub fn resolve(&self, snapshot: &ConfigSnapshot) -> ResolvedProviders {
        let storage_provider = snapshot.configuracao.storage_provider();
        let llm_provider = snapshot.configuracao.llm_provider();

        ResolvedProviders {
            storage_provider,
            llm_provider,
            storage: self.resolve_storage(snapshot, storage_provider),
            llm: self.resolve_llm(snapshot, llm_provider),
        }
    }

    fn resolve_storage(
        &self,
        snapshot: &ConfigSnapshot,
        provider: StorageProvider,
    ) -> StorageSelection {
        match provider {
            StorageProvider::Base44 => StorageSelection::Direct(self.default_store.clone()),
            StorageProvider::GoogleDrive => match self.drive_store(snapshot) {
                Some(drive) => StorageSelection::WithFallback {
                    primary: drive,
                    fallback: self.default_store.clone(),
                },
                None => {
                    tracing::warn!("Google Drive não inicializado, usando armazenamento padrão");
                    StorageSelection::FallbackOnly {
                        fallback: self.default_store.clone(),
                        reason: "Google Drive não inicializado".to_string(),
                    }
                }
            },
            StorageProvider::AwsS3 => {
                tracing::info!("Amazon S3 ainda não suportado, usando armazenamento padrão");
                StorageSelection::FallbackOnly {
                    fallback: self.default_store.clone(),
                    reason: "Amazon S3 ainda não suportado".to_string(),
                }
            }
        }
    }

    fn resolve_llm(&self, snapshot: &ConfigSnapshot, provider: LlmProvider) -> LlmSelection {
        if provider.is_default() {
            return LlmSelection::Direct(self.default_llm.clone());
        }

        let Some(api_key) = snapshot.secrets.api_key_for(provider) else {
            return LlmSelection::Misconfigured(configuration_error_message(provider));
        };

        let settings = snapshot.configuracao.settings();
        match provider {
            LlmProvider::Google => LlmSelection::Gemini {
                primary: self.factory.gemini(api_key, &settings.google_model),
                fallback: self.default_llm.clone(),
            },
            _ => LlmSelection::Direct(Arc::new(TaggedGenerator::new(
                self.default_llm.clone(),
                snapshot.configuracao.active_model().to_string(),
                provider.display_name(),
            ))),
        }
    }
}
