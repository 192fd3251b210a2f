//! `PostgreSQL`-backed collections.
//!
//! Every collection shares the `documents` table; rows are keyed by
//! `(collection, id)` and hold the serialized document as JSONB. Store order
//! is insertion order (`seq`).

use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use super::{Document, DocumentCollection, Filter, RepositoryError, decode_document};

/// Rows per INSERT statement, well below the bind-parameter limit.
const INSERT_BATCH_SIZE: usize = 1000;

/// A collection stored in the `documents` table.
pub struct PgCollection<T> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document> PgCollection<T> {
    /// Create a collection handle on the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    fn decode_all(rows: Vec<Json<Value>>) -> Result<Vec<T>, RepositoryError> {
        rows.into_iter()
            .map(|Json(doc)| decode_document(doc))
            .collect()
    }
}

fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("duplicate document id".to_owned());
    }
    RepositoryError::Database(e)
}

#[async_trait]
impl<T: Document> DocumentCollection<T> for PgCollection<T> {
    #[instrument(skip_all, fields(collection = T::COLLECTION, count = docs.len()))]
    async fn insert_many(&self, docs: &[T]) -> Result<u64, RepositoryError> {
        if docs.is_empty() {
            return Ok(0);
        }

        let rows = docs
            .iter()
            .map(|doc| Ok((doc.id().to_owned(), serde_json::to_value(doc)?)))
            .collect::<Result<Vec<(String, Value)>, serde_json::Error>>()?;

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for chunk in rows.chunks(INSERT_BATCH_SIZE) {
            let mut builder =
                QueryBuilder::<Postgres>::new("INSERT INTO documents (collection, id, doc) ");
            builder.push_values(chunk, |mut row, (id, doc)| {
                row.push_bind(T::COLLECTION)
                    .push_bind(id)
                    .push_bind(Json(doc));
            });
            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(map_insert_error)?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    #[instrument(skip_all, fields(collection = T::COLLECTION))]
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        let rows = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT doc FROM documents WHERE collection = $1 ORDER BY seq",
        )
        .bind(T::COLLECTION)
        .fetch_all(&self.pool)
        .await?;

        Self::decode_all(rows)
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT doc FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(T::COLLECTION)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|Json(doc)| decode_document(doc)).transpose()
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find_one(&self, filter: &Filter) -> Result<Option<T>, RepositoryError> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            r"
            SELECT doc FROM documents
            WHERE collection = $1 AND doc ->> $2 = $3
            ORDER BY seq
            LIMIT 1
            ",
        )
        .bind(T::COLLECTION)
        .bind(filter.field())
        .bind(filter.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|Json(doc)| decode_document(doc)).transpose()
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    async fn find(&self, filter: &Filter) -> Result<Vec<T>, RepositoryError> {
        let rows = sqlx::query_scalar::<_, Json<Value>>(
            r"
            SELECT doc FROM documents
            WHERE collection = $1 AND doc ->> $2 = $3
            ORDER BY seq
            ",
        )
        .bind(T::COLLECTION)
        .bind(filter.field())
        .bind(filter.value())
        .fetch_all(&self.pool)
        .await?;

        Self::decode_all(rows)
    }

    #[instrument(skip_all, fields(collection = T::COLLECTION))]
    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(T::COLLECTION)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
