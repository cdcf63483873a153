pub mod document_extractors;
pub mod gemini_client;
pub mod google_drive;
pub mod llm_gateway_client;
pub mod provider_factory;

pub use document_extractors::PdfExtractor;
pub use gemini_client::{DEFAULT_GEMINI_BASE_URL, GeminiClient, GeminiClientConfig};
pub use google_drive::{DEFAULT_DRIVE_API_BASE, GoogleDriveStore};
pub use llm_gateway_client::{LlmGatewayClient, LlmGatewayConfig};
pub use provider_factory::HttpProviderFactory;
