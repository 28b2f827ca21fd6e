//! Product entity binding and product-specific queries.

use catalog_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

use super::generic::{Entity, Repository};
use crate::models::product::{Product, ProductWithCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, author, price, category_id";

/// Product columns joined with the owning category's name.
const JOINED_SELECT: &str = "SELECT p.id, p.title, p.description, p.author, p.price, \
     p.category_id, c.cat_name AS category_name \
     FROM products p LEFT JOIN categories c ON c.id = p.category_id";

/// Repository for the `products` table.
pub type ProductRepo<'c> = Repository<'c, Product>;

impl Entity for Product {
    const NAME: &'static str = "Product";
    const TABLE: &'static str = "products";
    const COLUMNS: &'static str = COLUMNS;
    const WRITABLE: &'static [&'static str] =
        &["title", "description", "author", "price", "category_id"];

    fn id(&self) -> DbId {
        self.id
    }

    fn bind_writable<'q>(
        &'q self,
        query: QueryAs<'q, Postgres, Self, PgArguments>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        query
            .bind(&self.title)
            .bind(&self.description)
            .bind(&self.author)
            .bind(self.price)
            .bind(self.category_id)
    }
}

impl ProductRepo<'_> {
    /// All products with their category name, ordered by id.
    pub async fn list_with_category(&mut self) -> Result<Vec<ProductWithCategory>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} ORDER BY p.id");
        sqlx::query_as::<_, ProductWithCategory>(&query)
            .fetch_all(&mut *self.conn)
            .await
    }

    /// One product with its category name.
    pub async fn get_with_category(
        &mut self,
        id: DbId,
    ) -> Result<Option<ProductWithCategory>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, ProductWithCategory>(&query)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
    }
}
