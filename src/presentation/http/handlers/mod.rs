pub mod arquivo_handler;
pub mod chat_handler;
pub mod configuracao_handler;
pub mod drive_handler;
pub mod nota_handler;
pub mod upload_handler;

pub use arquivo_handler::ArquivoHandler;
pub use chat_handler::ChatHandler;
pub use configuracao_handler::ConfiguracaoHandler;
pub use drive_handler::DriveHandler;
pub use nota_handler::NotaHandler;
pub use upload_handler::UploadHandler;
