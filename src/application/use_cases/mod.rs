pub mod chat_with_notas;
pub mod dashboard_stats;
pub mod get_nota;
pub mod list_notas;
pub mod manage_configuracao;
pub mod manage_drive_files;
pub mod process_upload_queue;
pub mod search_notas;
pub mod update_nota;

pub use chat_with_notas::{ChatError, ChatRequest, ChatResponse, ChatWithNotasUseCase};
pub use dashboard_stats::{DashboardStats, DashboardStatsError, DashboardStatsUseCase};
pub use get_nota::{GetNotaError, GetNotaUseCase};
pub use list_notas::{ListNotasError, ListNotasRequest, ListNotasResponse, ListNotasUseCase};
pub use manage_configuracao::{
    ConfiguracaoError, ConfiguracaoView, ConnectionReport, GetConfiguracaoUseCase,
    SaveConfiguracaoUseCase, SecretPresence, TestConnectionsUseCase,
};
pub use manage_drive_files::{DriveFilesError, ManageDriveFilesUseCase};
pub use process_upload_queue::{
    ProcessUploadQueueError, ProcessUploadQueueRequest, ProcessUploadQueueUseCase, QueueReport,
};
pub use search_notas::{SearchNotasError, SearchNotasRequest, SearchNotasResponse, SearchNotasUseCase};
pub use update_nota::{UpdateNotaError, UpdateNotaRequest, UpdateNotaUseCase};
