use std::{sync::Arc, time::Duration};

use reqwest::Client;

use crate::{
    application::{
        ports::{ContentExtractor, FileStore, TextGenerator},
        services::{ProviderFactory, ProviderRegistry, QueueProgress},
        use_cases::{
            ChatWithNotasUseCase, DashboardStatsUseCase, GetConfiguracaoUseCase, GetNotaUseCase,
            ListNotasUseCase, ManageDriveFilesUseCase, ProcessUploadQueueUseCase,
            SaveConfiguracaoUseCase, SearchNotasUseCase, TestConnectionsUseCase,
            UpdateNotaUseCase,
        },
    },
    domain::repositories::{ConfiguracaoRepository, NotaRepository},
    infrastructure::{
        database::{
            create_connection_pool,
            repositories::{PostgresConfiguracaoRepository, PostgresNotaRepository},
            run_migrations,
        },
        external_services::{
            HttpProviderFactory, LlmGatewayClient, LlmGatewayConfig, PdfExtractor,
        },
        file_system::LocalFileStore,
        settings::AppSettings,
    },
    presentation::http::handlers::{
        ArquivoHandler, ChatHandler, ConfiguracaoHandler, DriveHandler, NotaHandler,
        UploadHandler,
    },
};

pub struct AppContainer {
    // Repositories
    pub nota_repository: Arc<dyn NotaRepository>,
    pub configuracao_repository: Arc<dyn ConfiguracaoRepository>,

    // External Services
    pub local_store: Arc<LocalFileStore>,
    pub default_llm: Arc<dyn TextGenerator>,
    pub extractor: Arc<dyn ContentExtractor>,
    pub registry: Arc<ProviderRegistry>,

    // Use Cases
    pub process_upload_queue_use_case: Arc<ProcessUploadQueueUseCase>,
    pub list_notas_use_case: Arc<ListNotasUseCase>,
    pub search_notas_use_case: Arc<SearchNotasUseCase>,
    pub get_nota_use_case: Arc<GetNotaUseCase>,
    pub update_nota_use_case: Arc<UpdateNotaUseCase>,
    pub dashboard_stats_use_case: Arc<DashboardStatsUseCase>,
    pub chat_use_case: Arc<ChatWithNotasUseCase>,
    pub get_configuracao_use_case: Arc<GetConfiguracaoUseCase>,
    pub save_configuracao_use_case: Arc<SaveConfiguracaoUseCase>,
    pub test_connections_use_case: Arc<TestConnectionsUseCase>,
    pub manage_drive_files_use_case: Arc<ManageDriveFilesUseCase>,

    // HTTP Handlers
    pub nota_handler: Arc<NotaHandler>,
    pub upload_handler: Arc<UploadHandler>,
    pub chat_handler: Arc<ChatHandler>,
    pub configuracao_handler: Arc<ConfiguracaoHandler>,
    pub drive_handler: Arc<DriveHandler>,
    pub arquivo_handler: Arc<ArquivoHandler>,
}

impl AppContainer {
    pub async fn new(settings: &AppSettings) -> Result<Self, Box<dyn std::error::Error>> {
        // Create database connection pool
        let db_pool = create_connection_pool(&settings.database_url)?;
        run_migrations(&db_pool)
            .map_err(|e| format!("Failed to run Database migrations: {}", e))?;

        // Create repositories
        let nota_repository: Arc<dyn NotaRepository> =
            Arc::new(PostgresNotaRepository::new(db_pool.clone()));
        let configuracao_repository: Arc<dyn ConfiguracaoRepository> =
            Arc::new(PostgresConfiguracaoRepository::new(db_pool));

        // One HTTP client for every outbound call
        let http_client = Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()?;

        // Create external services
        let local_store = Arc::new(LocalFileStore::new(
            settings.upload_dir.clone(),
            settings.public_base_url.clone(),
        ));
        local_store.ensure_directory_exists().await?;
        let default_store: Arc<dyn FileStore> = local_store.clone();

        let default_llm: Arc<dyn TextGenerator> = Arc::new(LlmGatewayClient::new(
            http_client.clone(),
            LlmGatewayConfig {
                url: settings.llm_gateway_url.clone(),
                api_key: settings.llm_gateway_api_key.clone(),
            },
        ));

        let extractor: Arc<dyn ContentExtractor> =
            Arc::new(PdfExtractor::new(http_client.clone(), local_store.clone()));

        let factory: Arc<dyn ProviderFactory> = Arc::new(HttpProviderFactory::new(
            http_client,
            settings.gemini_base_url.clone(),
            settings.drive_api_base.clone(),
            settings.drive_credentials_json.as_deref(),
        ));
        tracing::info!("Credenciais do Google Drive: {:?}", factory.drive_credentials());

        let registry = Arc::new(ProviderRegistry::new(
            default_store,
            default_llm.clone(),
            factory,
        ));
        let secrets = settings.secrets.clone();

        // Create use cases
        let process_upload_queue_use_case = Arc::new(ProcessUploadQueueUseCase::new(
            registry.clone(),
            extractor.clone(),
            nota_repository.clone(),
            configuracao_repository.clone(),
            secrets.clone(),
            Arc::new(QueueProgress::new()),
        ));

        let list_notas_use_case = Arc::new(ListNotasUseCase::new(nota_repository.clone()));
        let search_notas_use_case = Arc::new(SearchNotasUseCase::new(nota_repository.clone()));
        let get_nota_use_case = Arc::new(GetNotaUseCase::new(nota_repository.clone()));
        let update_nota_use_case = Arc::new(UpdateNotaUseCase::new(nota_repository.clone()));
        let dashboard_stats_use_case =
            Arc::new(DashboardStatsUseCase::new(nota_repository.clone()));

        let chat_use_case = Arc::new(ChatWithNotasUseCase::new(
            registry.clone(),
            nota_repository.clone(),
            configuracao_repository.clone(),
            secrets.clone(),
        ));

        let get_configuracao_use_case = Arc::new(GetConfiguracaoUseCase::new(
            configuracao_repository.clone(),
            registry.clone(),
            secrets.clone(),
        ));
        let save_configuracao_use_case =
            Arc::new(SaveConfiguracaoUseCase::new(configuracao_repository.clone()));
        let test_connections_use_case = Arc::new(TestConnectionsUseCase::new(
            configuracao_repository.clone(),
            registry.clone(),
            secrets.clone(),
        ));

        let manage_drive_files_use_case = Arc::new(ManageDriveFilesUseCase::new(
            registry.clone(),
            configuracao_repository.clone(),
            secrets,
        ));

        // Create HTTP handlers
        let nota_handler = Arc::new(NotaHandler::new(
            list_notas_use_case.clone(),
            search_notas_use_case.clone(),
            get_nota_use_case.clone(),
            update_nota_use_case.clone(),
            dashboard_stats_use_case.clone(),
        ));
        let upload_handler = Arc::new(UploadHandler::new(process_upload_queue_use_case.clone()));
        let chat_handler = Arc::new(ChatHandler::new(chat_use_case.clone()));
        let configuracao_handler = Arc::new(ConfiguracaoHandler::new(
            get_configuracao_use_case.clone(),
            save_configuracao_use_case.clone(),
            test_connections_use_case.clone(),
        ));
        let drive_handler = Arc::new(DriveHandler::new(manage_drive_files_use_case.clone()));
        let arquivo_handler = Arc::new(ArquivoHandler::new(local_store.clone()));

        Ok(Self {
            nota_repository,
            configuracao_repository,
            local_store,
            default_llm,
            extractor,
            registry,
            process_upload_queue_use_case,
            list_notas_use_case,
            search_notas_use_case,
            get_nota_use_case,
            update_nota_use_case,
            dashboard_stats_use_case,
            chat_use_case,
            get_configuracao_use_case,
            save_configuracao_use_case,
            test_connections_use_case,
            manage_drive_files_use_case,
            nota_handler,
            upload_handler,
            chat_handler,
            configuracao_handler,
            drive_handler,
            arquivo_handler,
        })
    }
}
