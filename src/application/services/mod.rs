pub mod chat_context;
pub mod nota_analyzer;
pub mod prompts;
pub mod provider_registry;
pub mod queue_progress;
pub mod tagged_generator;

pub use nota_analyzer::{Analysis, AnalysisError, AnalyzedFields, NotaAnalyzer};
pub use provider_registry::{
    ConfigSnapshot, CredentialStatus, LlmSelection, ProviderFactory, ProviderRegistry, ProviderSecrets,
    ResolvedProviders, StorageSelection,
};
pub use tagged_generator::TaggedGenerator;
pub use queue_progress::{ProgressSnapshot, QueueProgress, QueueRun};
