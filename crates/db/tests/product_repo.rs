//! Integration tests for the product repository, the category foreign key
//! and the demo seed.

use assert_matches::assert_matches;
use catalog_db::models::category::Category;
use catalog_db::models::product::Product;
use catalog_db::repositories::UnitOfWork;
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_category(pool: &PgPool, name: &str) -> Category {
    let mut uow = UnitOfWork::begin(pool).await.unwrap();
    let created = uow
        .categories()
        .add(&Category {
            id: 0,
            cat_name: name.to_string(),
            cat_order: 1,
            is_deleted: false,
        })
        .await
        .unwrap();
    uow.complete().await.unwrap();
    created
}

fn new_product(title: &str, category_id: i64) -> Product {
    Product {
        id: 0,
        title: title.to_string(),
        description: None,
        author: "Author".to_string(),
        price: Decimal::new(2500, 2),
        category_id,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn products_are_listed_with_category_name(pool: PgPool) {
    let fiction = create_category(&pool, "Fiction").await;

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let first = uow.products().add(&new_product("First", fiction.id)).await.unwrap();
    uow.products().add(&new_product("Second", fiction.id)).await.unwrap();
    uow.complete().await.unwrap();

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let all = uow.products().list_with_category().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|p| p.category_name.as_deref() == Some("Fiction")));

    let one = uow.products().get_with_category(first.id).await.unwrap().unwrap();
    assert_eq!(one.title, "First");
    assert_eq!(one.price, Decimal::new(2500, 2));
    assert!(uow.products().get_with_category(999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_filters_on_column(pool: PgPool) {
    let a = create_category(&pool, "A").await;
    let b = create_category(&pool, "B").await;

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    uow.products().add(&new_product("A1", a.id)).await.unwrap();
    uow.products().add(&new_product("A2", a.id)).await.unwrap();
    uow.products().add(&new_product("B1", b.id)).await.unwrap();

    // Staged rows are visible inside the same unit of work.
    let in_a = uow.products().find_by("category_id", a.id).await.unwrap();
    assert_eq!(
        in_a.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
        vec!["A1", "A2"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn product_update_persists_all_fields(pool: PgPool) {
    let a = create_category(&pool, "A").await;
    let b = create_category(&pool, "B").await;

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let mut product = uow.products().add(&new_product("Draft", a.id)).await.unwrap();
    uow.complete().await.unwrap();

    product.title = "Final".into();
    product.description = Some("Now with words".into());
    product.price = Decimal::new(1000, 0);
    product.category_id = b.id;

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    uow.products().update(&product).await.unwrap().unwrap();
    uow.complete().await.unwrap();

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let reloaded = uow.products().get_with_category(product.id).await.unwrap().unwrap();
    assert_eq!(reloaded.title, "Final");
    assert_eq!(reloaded.description.as_deref(), Some("Now with words"));
    assert_eq!(reloaded.price, Decimal::new(1000, 0));
    assert_eq!(reloaded.category_name.as_deref(), Some("B"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_category_is_a_foreign_key_violation(pool: PgPool) {
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let result = uow.products().add(&new_product("Orphan", 424_242)).await;

    assert_matches!(
        result,
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23503")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_with_products_cannot_be_deleted(pool: PgPool) {
    let science = create_category(&pool, "Science").await;

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    uow.products().add(&new_product("Cosmos", science.id)).await.unwrap();
    uow.complete().await.unwrap();

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let result = uow.categories().delete(&science).await;
    assert_matches!(
        result,
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23503")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seed_is_idempotent(pool: PgPool) {
    let inserted = catalog_db::seed::seed_demo_data(&pool).await.unwrap();
    assert_eq!(inserted, 5);

    let again = catalog_db::seed::seed_demo_data(&pool).await.unwrap();
    assert_eq!(again, 0);

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let categories = uow.categories().get_all_ordered().await.unwrap();
    assert_eq!(
        categories.iter().map(|c| c.cat_name.as_str()).collect::<Vec<_>>(),
        vec!["Science", "Technology", "History"]
    );
    let products = uow.products().list_with_category().await.unwrap();
    assert_eq!(products[0].category_name.as_deref(), Some("Science"));
    assert_eq!(products[1].price, Decimal::new(4950, 2));
}
