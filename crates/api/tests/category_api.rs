//! HTTP-level integration tests for the `/api/categories` endpoints.

mod common;

use axum::http::{Method, StatusCode};
use catalog_db::models::category::Category;
use catalog_db::repositories::UnitOfWork;
use common::{body_json, create_category, delete, get, post_json, put_json, send_raw};
use serde_json::json;
use sqlx::PgPool;

fn names(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|c| c["catName"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_201_with_location(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/categories",
        json!({ "catName": "Poetry", "catOrder": 4 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = common::header_str(&response, "location").unwrap().to_string();
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(location, format!("/api/categories/{id}"));
    assert_eq!(created["catName"], "Poetry");
    assert_eq!(created["catOrder"], 4);

    let fetched = body_json(get(app, &location).await).await;
    assert_eq!(fetched, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_nonexistent_category_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/categories/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_name_returns_field_errors(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/categories", json!({ "catOrder": 1 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["catName"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_malformed_json_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send_raw(app, Method::POST, "/api/categories", "{ catName: ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_name_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_category(app.clone(), "Science", 1).await;

    let response = post_json(
        app,
        "/api/categories",
        json!({ "catName": "Science", "catOrder": 2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Listing, paging, caching
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_ordered_by_order_then_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_category(app.clone(), "B", 2).await;
    create_category(app.clone(), "Z", 1).await;
    create_category(app.clone(), "A", 1).await;

    let response = get(app, "/api/categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(names(&body_json(response).await), vec!["A", "Z", "B"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn paged_returns_requested_window(pool: PgPool) {
    let app = common::build_test_app(pool);
    for (name, order) in [("E", 5), ("C", 3), ("A", 1), ("D", 4), ("B", 2)] {
        create_category(app.clone(), name, order).await;
    }

    let response = get(app.clone(), "/api/categories/paged?pageNumber=2&pageSize=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(names(&body_json(response).await), vec!["C", "D"]);

    // Defaults: first page of ten.
    let response = get(app, "/api/categories/paged").await;
    assert_eq!(names(&body_json(response).await).len(), 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn paged_rejects_invalid_parameters(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/categories/paged?pageNumber=0&pageSize=2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = get(app.clone(), "/api/categories/paged?pageNumber=1&pageSize=-3").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/api/categories/paged?pageNumber=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_served_from_cache_until_a_write(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_category(app.clone(), "Science", 1).await;
    assert_eq!(
        names(&body_json(get(app.clone(), "/api/categories").await).await),
        vec!["Science"]
    );

    // A row written behind the API's back is invisible while the entry lives.
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    uow.categories()
        .add(&Category {
            id: 0,
            cat_name: "Backdoor".into(),
            cat_order: 0,
            is_deleted: false,
        })
        .await
        .unwrap();
    uow.complete().await.unwrap();

    assert_eq!(
        names(&body_json(get(app.clone(), "/api/categories").await).await),
        vec!["Science"]
    );

    // Any write through the API drops the cached listings.
    create_category(app.clone(), "History", 3).await;
    assert_eq!(
        names(&body_json(get(app, "/api/categories").await).await),
        vec!["Backdoor", "Science", "History"]
    );
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_fields_and_returns_204(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_category(app.clone(), "Sciense", 1).await;

    let response = put_json(
        app.clone(),
        &format!("/api/categories/{id}"),
        json!({ "catName": "Science", "catOrder": 7, "markedAsDeleted": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(app.clone(), &format!("/api/categories/{id}")).await).await;
    assert_eq!(json["catName"], "Science");
    assert_eq!(json["catOrder"], 7);

    // The soft-delete marker does not hide the row.
    assert_eq!(
        names(&body_json(get(app, "/api/categories").await).await),
        vec!["Science"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_of_missing_id_is_404_whatever_the_body(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = put_json(app.clone(), "/api/categories/999999", json!({ "catName": "" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send_raw(app, Method::PUT, "/api/categories/999999", "not json").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_invalid_body_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_category(app.clone(), "Art", 1).await;

    let response = put_json(
        app,
        &format!("/api/categories/{id}"),
        json!({ "catName": "x".repeat(51), "catOrder": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["catName"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_to_taken_name_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_category(app.clone(), "Art", 1).await;
    let id = create_category(app.clone(), "Music", 2).await;

    let response = put_json(
        app,
        &format!("/api/categories/{id}"),
        json!({ "catName": "Art", "catOrder": 2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_twice_returns_204_then_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_category(app.clone(), "Ephemeral", 1).await;
    let uri = format!("/api/categories/{id}");

    assert_eq!(delete(app.clone(), &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete(app.clone(), &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_of_category_with_products_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_category(app.clone(), "Science", 1).await;
    let response = post_json(
        app.clone(),
        "/api/v1/products",
        json!({ "title": "Cosmos", "author": "Sagan", "price": 25, "categoryId": id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete(app.clone(), &format!("/api/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        get(app, &format!("/api/categories/{id}")).await.status(),
        StatusCode::OK
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_id_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/categories/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = delete(app, "/api/categories/1.5").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
