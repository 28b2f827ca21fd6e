//! Generic CRUD repository shared by every entity type.

use std::marker::PhantomData;

use catalog_core::types::DbId;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{Encode, FromRow, PgConnection, Postgres, Type};

/// A table-backed entity the generic repository can load and store.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Human-readable name used in errors and logs.
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Column list for `SELECT` and `RETURNING`, `id` included.
    const COLUMNS: &'static str;
    /// Columns written by insert and update, in [`Entity::bind_writable`] order.
    const WRITABLE: &'static [&'static str];

    fn id(&self) -> DbId;

    /// Bind one value per entry of [`Entity::WRITABLE`], in the same order.
    fn bind_writable<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments>;
}

/// CRUD access to one entity type within a unit of work.
///
/// Writes execute inside the unit of work's transaction and only become
/// durable when it completes. Every staged row change is counted.
pub struct Repository<'c, T> {
    pub(crate) conn: &'c mut PgConnection,
    staged: &'c mut u64,
    entity: PhantomData<fn() -> T>,
}

impl<'c, T: Entity> Repository<'c, T> {
    pub(crate) fn new(conn: &'c mut PgConnection, staged: &'c mut u64) -> Self {
        Self {
            conn,
            staged,
            entity: PhantomData,
        }
    }

    /// Find an entity by its primary key.
    pub async fn get_by_id(&mut self, id: DbId) -> Result<Option<T>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", T::COLUMNS, T::TABLE);
        sqlx::query_as::<_, T>(&query)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
    }

    /// Every entity whose `column` equals `value`, ordered by id.
    ///
    /// `column` must be one of the entity's own columns; it is interpolated
    /// into the SQL text.
    pub async fn find_by<V>(&mut self, column: &'static str, value: V) -> Result<Vec<T>, sqlx::Error>
    where
        V: for<'q> Encode<'q, Postgres> + Type<Postgres> + Send,
    {
        debug_assert!(
            T::COLUMNS.split(", ").any(|c| c == column),
            "{column} is not a column of {}",
            T::TABLE
        );
        let query = format!(
            "SELECT {} FROM {} WHERE {column} = $1 ORDER BY id",
            T::COLUMNS,
            T::TABLE
        );
        sqlx::query_as::<_, T>(&query)
            .bind(value)
            .fetch_all(&mut *self.conn)
            .await
    }

    /// Every row of the table, ordered by id.
    pub async fn list(&mut self) -> Result<Vec<T>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} ORDER BY id", T::COLUMNS, T::TABLE);
        sqlx::query_as::<_, T>(&query)
            .fetch_all(&mut *self.conn)
            .await
    }

    /// Stage an insert and return the row with its generated id.
    ///
    /// The id on `entity` is ignored.
    pub async fn add(&mut self, entity: &T) -> Result<T, sqlx::Error> {
        let placeholders = (1..=T::WRITABLE.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders}) RETURNING {}",
            T::TABLE,
            T::WRITABLE.join(", "),
            T::COLUMNS
        );
        let created = entity
            .bind_writable(sqlx::query_as::<_, T>(&query))
            .fetch_one(&mut *self.conn)
            .await?;

        *self.staged += 1;
        tracing::debug!(entity = T::NAME, id = created.id(), "Staged insert");
        Ok(created)
    }

    /// Stage an update of every writable column.
    ///
    /// Returns `None` if no row with the entity's id exists.
    pub async fn update(&mut self, entity: &T) -> Result<Option<T>, sqlx::Error> {
        let assignments = T::WRITABLE
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{col} = ${}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "UPDATE {} SET {assignments} WHERE id = ${} RETURNING {}",
            T::TABLE,
            T::WRITABLE.len() + 1,
            T::COLUMNS
        );
        let updated = entity
            .bind_writable(sqlx::query_as::<_, T>(&query))
            .bind(entity.id())
            .fetch_optional(&mut *self.conn)
            .await?;

        if updated.is_some() {
            *self.staged += 1;
            tracing::debug!(entity = T::NAME, id = entity.id(), "Staged update");
        }
        Ok(updated)
    }

    /// Stage removal of the entity's row. Returns `true` if a row was removed.
    pub async fn delete(&mut self, entity: &T) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&query)
            .bind(entity.id())
            .execute(&mut *self.conn)
            .await?;

        *self.staged += result.rows_affected();
        tracing::debug!(entity = T::NAME, id = entity.id(), "Staged delete");
        Ok(result.rows_affected() > 0)
    }
}
