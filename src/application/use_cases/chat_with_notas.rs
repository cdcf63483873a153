use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::application::ports::{GenerationOptions, TextGenerationError};
use crate::application::services::{
    ConfigSnapshot, LlmSelection, ProviderRegistry, ProviderSecrets, chat_context, prompts,
};
use crate::domain::entities::{Configuracao, NotaSort};
use crate::domain::repositories::{
    ConfiguracaoRepository, NotaRepository, configuracao_repository::ConfiguracaoRepositoryError,
    nota_repository::NotaRepositoryError,
};
use crate::domain::value_objects::LlmProvider;

const CONTEXT_NOTES: i64 = 100;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<NotaRepositoryError> for ChatError {
    fn from(error: NotaRepositoryError) -> Self {
        ChatError::RepositoryError(error.to_string())
    }
}

impl From<ConfiguracaoRepositoryError> for ChatError {
    fn from(error: ConfiguracaoRepositoryError) -> Self {
        ChatError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub provider: String,
    /// Detail of a provider failure; the reply then holds the apology.
    pub error: Option<String>,
}

pub fn default_greeting(provider: LlmProvider) -> String {
    format!(
        "Olá! Sou a assistente de IA do NatJus ({}). Faça perguntas sobre as notas técnicas e eu buscarei as informações para você.",
        provider.display_name()
    )
}

fn apology(provider: LlmProvider) -> String {
    format!(
        "Desculpe, ocorreu um erro ao processar sua pergunta usando {}. Tente novamente ou verifique as configurações.",
        provider.display_name()
    )
}

pub struct ChatWithNotasUseCase {
    registry: Arc<ProviderRegistry>,
    nota_repository: Arc<dyn NotaRepository>,
    configuracao_repository: Arc<dyn ConfiguracaoRepository>,
    secrets: ProviderSecrets,
}

impl ChatWithNotasUseCase {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        nota_repository: Arc<dyn NotaRepository>,
        configuracao_repository: Arc<dyn ConfiguracaoRepository>,
        secrets: ProviderSecrets,
    ) -> Self {
        Self {
            registry,
            nota_repository,
            configuracao_repository,
            secrets,
        }
    }

    async fn configuracao(&self) -> Result<Configuracao, ChatError> {
        Ok(self
            .configuracao_repository
            .find_first()
            .await?
            .unwrap_or_default())
    }

    pub async fn greeting(&self) -> Result<String, ChatError> {
        let config = self.configuracao().await?;
        Ok(config
            .settings()
            .chat_greeting
            .clone()
            .unwrap_or_else(|| default_greeting(config.llm_provider())))
    }

    pub async fn execute(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ChatError::ValidationError(
                "Mensagem não pode ser vazia".to_string(),
            ));
        }

        let snapshot = ConfigSnapshot::new(self.configuracao().await?, self.secrets.clone());
        let provider = snapshot.configuracao.llm_provider();
        let resolved = self.registry.resolve(&snapshot);

        let notas = self
            .nota_repository
            .find_all(NotaSort::DataEmissao, CONTEXT_NOTES)
            .await?;
        let context = chat_context::build_context(&notas);

        let answer = match &resolved.llm {
            LlmSelection::Misconfigured(text) => Ok(text.clone()),
            LlmSelection::Direct(generator) => generator
                .generate_content(
                    &prompts::chat_prompt(message, &context),
                    GenerationOptions::default(),
                )
                .await
                .map(|c| c.into_text()),
            LlmSelection::Gemini { primary, fallback } => {
                match primary.chat_response(message, &context).await {
                    Ok(content) => Ok(content.into_text()),
                    Err(e) => {
                        tracing::warn!("Erro na API do Gemini, fazendo fallback: {}", e);
                        fallback
                            .generate_content(
                                &prompts::chat_prompt(message, &context),
                                GenerationOptions::default(),
                            )
                            .await
                            .map(|c| c.into_text())
                    }
                }
            }
        };

        Ok(match answer {
            Ok(reply) => ChatResponse {
                reply: chat_context::attach_pdf_link(message, reply, &notas),
                provider: provider.display_name().to_string(),
                error: None,
            },
            Err(e) => {
                tracing::error!("Erro no chat: {}", e);
                ChatResponse {
                    reply: apology(provider),
                    provider: provider.display_name().to_string(),
                    error: Some(describe(&e)),
                }
            }
        })
    }
}

fn describe(error: &TextGenerationError) -> String {
    format!("Erro: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ConfiguracaoSettings;
    use crate::test_support::{
        FakeConfiguracaoRepository, FakeGenerator, FakeNotaRepository, FakeProviderFactory,
        FakeStore, sample_nota,
    };
    use crate::domain::value_objects::StorageProvider;

    fn build(
        provider: LlmProvider,
        secrets: ProviderSecrets,
        default_llm: Arc<FakeGenerator>,
        factory: FakeProviderFactory,
    ) -> (ChatWithNotasUseCase, Arc<FakeNotaRepository>) {
        let notas = Arc::new(FakeNotaRepository::new());
        notas.insert(sample_nota("1234/2024", vec!["insulina".to_string()]));
        let config = Configuracao::new(ConfiguracaoSettings {
            llm_provider: provider,
            ..Default::default()
        });
        let registry = Arc::new(ProviderRegistry::new(
            Arc::new(FakeStore::new(StorageProvider::Base44)),
            default_llm,
            Arc::new(factory),
        ));
        (
            ChatWithNotasUseCase::new(
                registry,
                notas.clone(),
                Arc::new(FakeConfiguracaoRepository::with(config)),
                secrets,
            ),
            notas,
        )
    }

    #[tokio::test]
    async fn test_default_reply_gets_pdf_link() {
        let default = Arc::new(FakeGenerator::text("Base44", "A nota 1234/2024 trata de insulina."));
        let (use_case, notas) = build(
            LlmProvider::Base44,
            ProviderSecrets::default(),
            default.clone(),
            FakeProviderFactory::new(false),
        );

        let response = use_case
            .execute(ChatRequest {
                message: "Quero o PDF da nota de insulina".to_string(),
            })
            .await
            .unwrap();

        let url = notas.all()[0].arquivo_url().to_string();
        assert!(response.reply.ends_with(&format!("🔗 [Baixar PDF]({})", url)));
        assert!(default.prompts()[0].contains(&format!("URL_DO_PDF: {}", url)));
        assert_eq!(response.error, None);
    }

    #[tokio::test]
    async fn test_missing_key_returns_configuration_text() {
        let default = Arc::new(FakeGenerator::text("Base44", "nunca"));
        let (use_case, _) = build(
            LlmProvider::Anthropic,
            ProviderSecrets::default(),
            default.clone(),
            FakeProviderFactory::new(false),
        );

        let response = use_case
            .execute(ChatRequest {
                message: "Oi".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            response.reply,
            "Erro: Chave API do Claude não configurada. Verifique as configurações."
        );
        assert!(default.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_gemini_error_falls_back_to_default() {
        let default = Arc::new(FakeGenerator::text("Base44", "resposta padrão"));
        let factory = FakeProviderFactory::new(false).with_gemini(FakeGenerator::failing(
            "Gemini",
            TextGenerationError::EmptyResponse("Gemini".to_string()),
        ));
        let secrets = ProviderSecrets {
            google_api_key: Some("chave".to_string()),
            ..Default::default()
        };
        let (use_case, _) = build(LlmProvider::Google, secrets, default.clone(), factory);

        let response = use_case
            .execute(ChatRequest {
                message: "Oi".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.reply, "resposta padrão");
        assert_eq!(default.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_returns_apology() {
        let default = Arc::new(FakeGenerator::failing(
            "Base44",
            TextGenerationError::NetworkError("connection refused".to_string()),
        ));
        let (use_case, _) = build(
            LlmProvider::Base44,
            ProviderSecrets::default(),
            default,
            FakeProviderFactory::new(false),
        );

        let response = use_case
            .execute(ChatRequest {
                message: "Oi".to_string(),
            })
            .await
            .unwrap();

        assert!(response.reply.starts_with("Desculpe, ocorreu um erro ao processar sua pergunta usando Base44."));
        assert!(response.error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_greeting() {
        let (use_case, _) = build(
            LlmProvider::Google,
            ProviderSecrets::default(),
            Arc::new(FakeGenerator::text("Base44", "")),
            FakeProviderFactory::new(false),
        );
        let greeting = use_case.greeting().await.unwrap();
        assert!(greeting.contains("NatJus (Gemini)"));
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let (use_case, _) = build(
            LlmProvider::Base44,
            ProviderSecrets::default(),
            Arc::new(FakeGenerator::text("Base44", "")),
            FakeProviderFactory::new(false),
        );
        let err = use_case
            .execute(ChatRequest {
                message: "   ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::ValidationError(_)));
    }
}
