//! Handlers for the `/categories` resource.
//!
//! Listings are served from the shared category cache; every successful
//! write drops all cached listings.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::Json;
use catalog_core::cache::{paged_categories_key, ALL_CATEGORIES_KEY};
use catalog_core::error::CoreError;
use catalog_core::pagination::PageRequest;
use catalog_core::types::DbId;
use catalog_db::models::category::{Category, CategoryCreate, CategoryRead, CategoryUpdate};
use catalog_db::repositories::UnitOfWork;

use crate::error::{AppError, AppResult};
use crate::extract::{parse_validated, IdPath, ValidatedJson};
use crate::query::PaginationParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

fn to_snapshot(rows: &[Category]) -> Arc<Vec<CategoryRead>> {
    Arc::new(rows.iter().map(CategoryRead::from).collect())
}

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryRead>>> {
    let categories = state
        .category_cache
        .get_or_try_insert_with(ALL_CATEGORIES_KEY, || async {
            let mut uow = UnitOfWork::begin(&state.pool).await?;
            let rows = uow.categories().get_all_ordered().await?;
            Ok::<_, AppError>(to_snapshot(&rows))
        })
        .await?;
    Ok(Json(categories.as_ref().clone()))
}

/// GET /api/categories/paged?pageNumber=&pageSize=
pub async fn paged(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Json<Vec<CategoryRead>>> {
    let Query(params) = params.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let page = PageRequest::new(
        params.page_number,
        params.page_size,
        state.config.max_page_size,
    )?;

    let key = paged_categories_key(page.page_number, page.page_size);
    let categories = state
        .category_cache
        .get_or_try_insert_with(&key, || async {
            let mut uow = UnitOfWork::begin(&state.pool).await?;
            let rows = uow.categories().get_paged(&page).await?;
            Ok::<_, AppError>(to_snapshot(&rows))
        })
        .await?;
    Ok(Json(categories.as_ref().clone()))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<CategoryRead>> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let category = uow
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(CategoryRead::from(&category)))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CategoryCreate>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<CategoryRead>)> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    if uow.categories().find_by_name(&input.cat_name).await?.is_some() {
        return Err(CoreError::Conflict(format!(
            "A category named '{}' already exists",
            input.cat_name
        ))
        .into());
    }

    let created = uow.categories().add(&Category::from(input)).await?;
    uow.complete().await?;
    state.category_cache.invalidate_all();

    tracing::info!(category_id = created.id, name = %created.cat_name, "Category created");

    let location = format!("/api/categories/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CategoryRead::from(&created)),
    ))
}

/// PUT /api/categories/{id}
///
/// The body is only parsed once the category is known to exist, so an
/// unknown id answers 404 whatever the payload.
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    body: Bytes,
) -> AppResult<StatusCode> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let mut category = uow
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let input: CategoryUpdate = parse_validated(&body)?;
    if let Some(other) = uow.categories().find_by_name(&input.cat_name).await? {
        if other.id != id {
            return Err(CoreError::Conflict(format!(
                "A category named '{}' already exists",
                input.cat_name
            ))
            .into());
        }
    }

    input.apply_to(&mut category);
    uow.categories().update(&category).await?;
    uow.complete().await?;
    state.category_cache.invalidate_all();

    tracing::info!(category_id = id, "Category updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/categories/{id}
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let category = uow
        .categories()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !uow.categories().delete(&category).await? {
        return Err(not_found(id));
    }
    uow.complete().await?;
    state.category_cache.invalidate_all();

    tracing::info!(category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
