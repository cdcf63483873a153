pub mod postgres_configuracao_repository;
pub mod postgres_nota_repository;

pub use postgres_configuracao_repository::PostgresConfiguracaoRepository;
pub use postgres_nota_repository::PostgresNotaRepository;
