use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::Configuracao;
use crate::domain::repositories::{ConfiguracaoRepository, ConfiguracaoRepositoryError};
use crate::infrastructure::database::models::ConfiguracaoModel;
use crate::infrastructure::database::schema::configuracoes::dsl::*;
use crate::infrastructure::database::{DatabaseError, DbPool, with_connection};

pub struct PostgresConfiguracaoRepository {
    pool: DbPool,
}

impl PostgresConfiguracaoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<DatabaseError> for ConfiguracaoRepositoryError {
    fn from(e: DatabaseError) -> Self {
        ConfiguracaoRepositoryError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl ConfiguracaoRepository for PostgresConfiguracaoRepository {
    async fn find_first(&self) -> Result<Option<Configuracao>, ConfiguracaoRepositoryError> {
        let result = with_connection(&self.pool, |conn| {
            configuracoes
                .order(created_at.asc())
                .select(ConfiguracaoModel::as_select())
                .first(conn)
                .optional()
        })
        .await?;

        result
            .map(Configuracao::try_from)
            .transpose()
            .map_err(ConfiguracaoRepositoryError::ValidationError)
    }

    async fn save(&self, config: &Configuracao) -> Result<(), ConfiguracaoRepositoryError> {
        let model = ConfiguracaoModel::from(config);

        with_connection(&self.pool, move |conn| {
            diesel::insert_into(configuracoes)
                .values(&model)
                .on_conflict(id)
                .do_update()
                .set(&model)
                .execute(conn)
        })
        .await?;

        tracing::info!("Configuração salva: {}", config.id());
        Ok(())
    }
}
