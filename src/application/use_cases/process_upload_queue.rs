use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::application::ports::{ContentExtractor, FileStore, StoredFile, UploadedFile};
use crate::application::services::{
    ConfigSnapshot, NotaAnalyzer, ProviderRegistry, ProviderSecrets, QueueProgress, QueueRun,
    ResolvedProviders, StorageSelection, prompts,
};
use crate::domain::entities::{NotaDraft, NotaTecnica};
use crate::domain::repositories::{
    ConfiguracaoRepository, NotaRepository, configuracao_repository::ConfiguracaoRepositoryError,
};
use crate::domain::value_objects::{FileOutcome, StorageProvider};

#[derive(Debug, Error)]
pub enum ProcessUploadQueueError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Já existe uma fila de processamento em andamento")]
    QueueBusy,
    #[error("Erro ao carregar configurações: {0}")]
    ConfigurationError(String),
}

impl From<ConfiguracaoRepositoryError> for ProcessUploadQueueError {
    fn from(error: ConfiguracaoRepositoryError) -> Self {
        ProcessUploadQueueError::ConfigurationError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ProcessUploadQueueRequest {
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueueReport {
    pub processed: usize,
    pub total: usize,
    pub outcomes: Vec<FileOutcome>,
    pub errors: Vec<String>,
    pub message: String,
}

impl QueueReport {
    pub fn persisted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_persisted()).count()
    }
}

/// Rejects the whole batch unless every file is a PDF.
pub fn validate_batch(files: &[UploadedFile]) -> Result<(), ProcessUploadQueueError> {
    if files.is_empty() {
        return Err(ProcessUploadQueueError::ValidationError(
            "Nenhum arquivo enviado".to_string(),
        ));
    }

    let rejected: Vec<&str> = files
        .iter()
        .filter(|f| !f.is_pdf())
        .map(|f| f.name.as_str())
        .collect();

    if rejected.is_empty() {
        Ok(())
    } else {
        Err(ProcessUploadQueueError::ValidationError(format!(
            "Apenas arquivos PDF são aceitos. Arquivos rejeitados: {}",
            rejected.join(", ")
        )))
    }
}

pub struct ProcessUploadQueueUseCase {
    registry: Arc<ProviderRegistry>,
    extractor: Arc<dyn ContentExtractor>,
    nota_repository: Arc<dyn NotaRepository>,
    configuracao_repository: Arc<dyn ConfiguracaoRepository>,
    secrets: ProviderSecrets,
    progress: Arc<QueueProgress>,
}

impl ProcessUploadQueueUseCase {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        extractor: Arc<dyn ContentExtractor>,
        nota_repository: Arc<dyn NotaRepository>,
        configuracao_repository: Arc<dyn ConfiguracaoRepository>,
        secrets: ProviderSecrets,
        progress: Arc<QueueProgress>,
    ) -> Self {
        Self {
            registry,
            extractor,
            nota_repository,
            configuracao_repository,
            secrets,
            progress,
        }
    }

    pub fn progress(&self) -> Arc<QueueProgress> {
        self.progress.clone()
    }

    pub async fn execute(
        &self,
        request: ProcessUploadQueueRequest,
    ) -> Result<QueueReport, ProcessUploadQueueError> {
        validate_batch(&request.files)?;

        let total = request.files.len();
        let run = self
            .progress
            .try_start(total)
            .ok_or(ProcessUploadQueueError::QueueBusy)?;

        let configuracao = self
            .configuracao_repository
            .find_first()
            .await?
            .unwrap_or_default();
        let snapshot = ConfigSnapshot::new(configuracao, self.secrets.clone());
        let resolved = self.registry.resolve(&snapshot);

        tracing::info!(
            "Iniciando fila com {} arquivo(s) (armazenamento: {}, IA: {})",
            total,
            resolved.storage_provider,
            resolved.llm_provider
        );

        let report = self.run_queue(&run, &resolved, request.files).await;
        drop(run);
        Ok(report)
    }

    async fn run_queue(
        &self,
        run: &QueueRun,
        resolved: &ResolvedProviders,
        files: Vec<UploadedFile>,
    ) -> QueueReport {
        let total = files.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut processed = 0;

        for file in files {
            run.begin_file(&file.name);
            tracing::info!("Processando arquivo: {}", file.name);

            let outcome = self.process_file(resolved, file).await;
            match outcome.error_message() {
                Some(message) => {
                    tracing::error!("Erro ao processar {}: {}", outcome.file_name(), message)
                }
                None => tracing::info!("Nota salva: {}", outcome.file_name()),
            }

            outcomes.push(outcome);
            processed = run.finish_file();
        }

        let errors = outcomes.iter().filter_map(|o| o.user_message()).collect();

        QueueReport {
            processed,
            total,
            outcomes,
            errors,
            message: format!(
                "Todos os arquivos foram processados e salvos com sucesso no {}!",
                resolved.storage_provider.display_name()
            ),
        }
    }

    async fn process_file(&self, resolved: &ResolvedProviders, file: UploadedFile) -> FileOutcome {
        let stored = match store(&resolved.storage, &file).await {
            Ok(stored) => stored,
            Err(message) => {
                return FileOutcome::StoreFailed {
                    file_name: file.name,
                    message,
                };
            }
        };
        tracing::info!("Upload concluído: {} -> {}", file.name, stored.file_url);

        let extraction = match self
            .extractor
            .extract(&stored.file_url, &prompts::nota_record_schema())
            .await
        {
            Ok(result) if result.is_success() => result,
            Ok(result) => {
                if let Some(details) = &result.details {
                    tracing::warn!("Extração sem sucesso para {}: {}", file.name, details);
                }
                return FileOutcome::ExtractFailed {
                    message: format!("Erro ao extrair conteúdo do PDF: {}", file.name),
                    file_name: file.name,
                };
            }
            Err(e) => {
                return FileOutcome::ExtractFailed {
                    file_name: file.name,
                    message: e.to_string(),
                };
            }
        };

        let analysis = match NotaAnalyzer::analyze(&resolved.llm, &extraction.output).await {
            Ok(analysis) => analysis,
            Err(e) => {
                return FileOutcome::StructureFailed {
                    file_name: file.name,
                    message: e.message,
                    used_fallback: e.used_fallback,
                };
            }
        };

        let fields = analysis.fields;
        let drive_file_id = match stored.provider {
            StorageProvider::GoogleDrive => Some(stored.file_id.clone()),
            _ => None,
        };
        let draft = NotaDraft {
            numero: fields.numero,
            tipo: fields.tipo,
            titulo: fields.titulo,
            data_emissao: fields.data_emissao,
            demanda: fields.demanda,
            procedimento: fields.procedimento,
            representante_comarca: fields.representante_comarca,
            resumo: fields.resumo,
            tags: fields.tags,
            conteudo_extraido: extraction.output.to_string(),
            arquivo_url: stored.file_url.clone(),
            nome_arquivo: file.name.clone(),
            storage_provider: stored.provider,
            drive_file_id,
        };

        let nota = match NotaTecnica::create(draft) {
            Ok(nota) => nota,
            Err(message) => {
                return FileOutcome::PersistFailed {
                    file_name: file.name,
                    message,
                };
            }
        };

        if let Err(e) = self.nota_repository.save(&nota).await {
            return FileOutcome::PersistFailed {
                file_name: file.name,
                message: e.to_string(),
            };
        }

        FileOutcome::Persisted {
            file_name: file.name,
            nota_id: nota.id(),
            used_storage_fallback: stored.used_fallback,
            used_llm_fallback: analysis.used_fallback,
        }
    }
}

async fn store(selection: &StorageSelection, file: &UploadedFile) -> Result<StoredFile, String> {
    async fn upload(
        store: &Arc<dyn FileStore>,
        file: &UploadedFile,
        used_fallback: bool,
    ) -> Result<StoredFile, String> {
        let mut stored = store.upload_file(file).await.map_err(|e| e.to_string())?;
        stored.used_fallback = used_fallback;
        Ok(stored)
    }

    match selection {
        StorageSelection::Direct(store) => upload(store, file, false).await,
        StorageSelection::FallbackOnly { fallback, reason } => {
            tracing::warn!("{}: usando armazenamento padrão para {}", reason, file.name);
            upload(fallback, file, true).await
        }
        StorageSelection::WithFallback { primary, fallback } => {
            match upload(primary, file, false).await {
                Ok(stored) => Ok(stored),
                Err(e) => {
                    tracing::warn!(
                        "Erro no upload para {}: {}. Fazendo fallback para o armazenamento padrão",
                        primary.provider().display_name(),
                        e
                    );
                    upload(fallback, file, true).await
                }
            }
        }
    }
}
