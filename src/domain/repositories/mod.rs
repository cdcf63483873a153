pub mod configuracao_repository;
pub mod nota_repository;

pub use configuracao_repository::{ConfiguracaoRepository, ConfiguracaoRepositoryError};
pub use nota_repository::{NotaRepository, NotaRepositoryError};
