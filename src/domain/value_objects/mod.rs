pub mod file_outcome;
pub mod nota_tipo;
pub mod provider_kind;

pub use file_outcome::FileOutcome;
pub use nota_tipo::NotaTipo;
pub use provider_kind::{LlmProvider, StorageProvider};
