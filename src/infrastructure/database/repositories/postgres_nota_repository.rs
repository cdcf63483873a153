use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::entities::{NotaSort, NotaTecnica};
use crate::domain::repositories::{NotaRepository, NotaRepositoryError};
use crate::domain::value_objects::NotaTipo;
use crate::infrastructure::database::models::NotaModel;
use crate::infrastructure::database::schema::notas_tecnicas::dsl::*;
use crate::infrastructure::database::{DatabaseError, DbPool, with_connection};

diesel::define_sql_function!(fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text);

pub struct PostgresNotaRepository {
    pool: DbPool,
}

impl PostgresNotaRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<DatabaseError> for NotaRepositoryError {
    fn from(e: DatabaseError) -> Self {
        NotaRepositoryError::DatabaseError(e.to_string())
    }
}

fn to_domain(model: NotaModel) -> Result<NotaTecnica, NotaRepositoryError> {
    NotaTecnica::try_from(model).map_err(NotaRepositoryError::ValidationError)
}

#[async_trait]
impl NotaRepository for PostgresNotaRepository {
    async fn save(&self, nota: &NotaTecnica) -> Result<(), NotaRepositoryError> {
        let model = NotaModel::from(nota);

        with_connection(&self.pool, move |conn| {
            diesel::insert_into(notas_tecnicas)
                .values(&model)
                .execute(conn)
        })
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, nota_id: Uuid) -> Result<Option<NotaTecnica>, NotaRepositoryError> {
        let result = with_connection(&self.pool, move |conn| {
            notas_tecnicas
                .find(nota_id)
                .select(NotaModel::as_select())
                .first(conn)
                .optional()
        })
        .await?;

        result.map(to_domain).transpose()
    }

    async fn find_all(
        &self,
        sort: NotaSort,
        limit: i64,
    ) -> Result<Vec<NotaTecnica>, NotaRepositoryError> {
        let models = with_connection(&self.pool, move |conn| {
            let query = notas_tecnicas.select(NotaModel::as_select()).into_boxed();
            let query = match sort {
                NotaSort::DataEmissao => query
                    .order(data_emissao.desc().nulls_last())
                    .then_order_by(created_at.desc()),
                NotaSort::Numero => query.order(numero.asc()),
                NotaSort::Titulo => query.order(lower(titulo).asc()),
            };
            query.limit(limit).load(conn)
        })
        .await?;

        models.into_iter().map(to_domain).collect()
    }

    async fn update(&self, nota: &NotaTecnica) -> Result<(), NotaRepositoryError> {
        let model = NotaModel::from(nota);
        let nota_id = nota.id();

        let updated = with_connection(&self.pool, move |conn| {
            diesel::update(notas_tecnicas.find(nota_id))
                .set(&model)
                .execute(conn)
        })
        .await?;

        if updated == 0 {
            return Err(NotaRepositoryError::NotFound(nota_id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, NotaRepositoryError> {
        let total = with_connection(&self.pool, |conn| notas_tecnicas.count().get_result(conn)).await?;
        Ok(total)
    }

    async fn count_by_tipo(&self, wanted: NotaTipo) -> Result<i64, NotaRepositoryError> {
        let value = wanted.as_str();
        let total = with_connection(&self.pool, move |conn| {
            notas_tecnicas
                .filter(tipo.eq(value))
                .count()
                .get_result(conn)
        })
        .await?;
        Ok(total)
    }

    async fn count_emitted_between(
        &self,
        from: NaiveDate,
        until: NaiveDate,
    ) -> Result<i64, NotaRepositoryError> {
        let total = with_connection(&self.pool, move |conn| {
            notas_tecnicas
                .filter(data_emissao.ge(from))
                .filter(data_emissao.lt(until))
                .count()
                .get_result(conn)
        })
        .await?;
        Ok(total)
    }

    async fn find_tags(&self) -> Result<Vec<String>, NotaRepositoryError> {
        let rows: Vec<Vec<String>> = with_connection(&self.pool, |conn| {
            notas_tecnicas
                .select(tags)
                .load(conn)
        })
        .await?;

        Ok(rows
            .into_iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }
}
