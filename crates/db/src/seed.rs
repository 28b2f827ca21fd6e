//! Demo catalog data for local development.

use rust_decimal::Decimal;

use crate::models::category::Category;
use crate::models::product::Product;
use crate::repositories::UnitOfWork;
use crate::DbPool;

/// (name, order)
const CATEGORIES: &[(&str, i32)] = &[("Science", 1), ("Technology", 2), ("History", 3)];

/// (title, description, author, price in cents, category name)
const PRODUCTS: &[(&str, &str, &str, i64, &str)] = &[
    ("Book 1", "Desc 1", "Author 1", 9999, "Science"),
    ("Book 2", "Desc 2", "Author 2", 4950, "Technology"),
];

/// Insert the demo categories and products that are not present yet.
///
/// Matching is by category name and product title, so running this on every
/// start is harmless. Returns the number of rows inserted.
pub async fn seed_demo_data(pool: &DbPool) -> Result<u64, sqlx::Error> {
    let mut uow = UnitOfWork::begin(pool).await?;

    for &(name, order) in CATEGORIES {
        if uow.categories().find_by_name(name).await?.is_none() {
            uow.categories()
                .add(&Category {
                    id: 0,
                    cat_name: name.to_string(),
                    cat_order: order,
                    is_deleted: false,
                })
                .await?;
        }
    }

    for &(title, description, author, cents, category) in PRODUCTS {
        if !uow.products().find_by("title", title.to_string()).await?.is_empty() {
            continue;
        }
        let Some(category) = uow.categories().find_by_name(category).await? else {
            continue;
        };
        uow.products()
            .add(&Product {
                id: 0,
                title: title.to_string(),
                description: Some(description.to_string()),
                author: author.to_string(),
                price: Decimal::new(cents, 2),
                category_id: category.id,
            })
            .await?;
    }

    let inserted = uow.complete().await?;
    tracing::info!(inserted, "Demo catalog data seeded");
    Ok(inserted)
}
