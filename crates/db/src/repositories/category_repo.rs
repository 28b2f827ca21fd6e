//! Category entity binding and category-specific queries.

use catalog_core::pagination::PageRequest;
use catalog_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

use super::generic::{Entity, Repository};
use crate::models::category::Category;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, cat_name, cat_order, is_deleted";

/// Listing order. Names compare bytewise so ties sort the same under any
/// database collation.
const ORDERING: &str = "cat_order, cat_name COLLATE \"C\"";

/// Repository for the `categories` table.
pub type CategoryRepo<'c> = Repository<'c, Category>;

impl Entity for Category {
    const NAME: &'static str = "Category";
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static str = COLUMNS;
    const WRITABLE: &'static [&'static str] = &["cat_name", "cat_order", "is_deleted"];

    fn id(&self) -> DbId {
        self.id
    }

    fn bind_writable<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(&self.cat_name)
            .bind(self.cat_order)
            .bind(self.is_deleted)
    }
}

impl CategoryRepo<'_> {
    /// All categories ordered by `cat_order`, then `cat_name` bytewise.
    pub async fn get_all_ordered(&mut self) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY {ORDERING}");
        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&mut *self.conn)
            .await
    }

    /// One page of the ordering used by [`CategoryRepo::get_all_ordered`].
    pub async fn get_paged(&mut self, page: &PageRequest) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories \
             ORDER BY {ORDERING} \
             OFFSET $1 LIMIT $2"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(page.offset())
            .bind(page.limit())
            .fetch_all(&mut *self.conn)
            .await
    }

    /// Find a category by its unique name.
    pub async fn find_by_name(&mut self, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let mut found = self.find_by("cat_name", name.to_string()).await?;
        Ok(found.pop())
    }
}
