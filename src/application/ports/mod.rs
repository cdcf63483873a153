pub mod content_extractor;
pub mod file_store;
pub mod text_generator;

pub use content_extractor::{ContentExtractionError, ContentExtractor, ExtractionResult};
pub use file_store::{FileStore, FileStoreError, StoredFile, StoredFileInfo, UploadedFile};
pub use text_generator::{GeneratedContent, GenerationOptions, TextGenerationError, TextGenerator};
