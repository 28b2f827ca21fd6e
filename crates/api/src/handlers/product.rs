//! Handlers for the versioned `/products` resource.
//!
//! Every supported API version is served by these handlers; the version the
//! request was routed through arrives as an [`ApiVersion`] extension and only
//! shapes the `Location` header.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::{Extension, Json};
use catalog_core::error::CoreError;
use catalog_core::patch::{apply_patch, PatchDocument};
use catalog_core::types::DbId;
use catalog_db::models::product::{
    Product, ProductCreate, ProductPatch, ProductRead, ProductUpdate,
};
use catalog_db::repositories::UnitOfWork;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{AppError, AppResult};
use crate::extract::{parse_json, parse_validated, IdPath, ValidatedJson};
use crate::state::AppState;
use crate::version::ApiVersion;

type HeaderPair = [(header::HeaderName, String); 1];

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

fn cache_control(state: &AppState) -> HeaderPair {
    [(
        header::CACHE_CONTROL,
        format!("public, max-age={}", state.config.product_cache_max_age_secs),
    )]
}

/// Resolve `category_id` to its name, or fail as a field validation error.
async fn require_category(uow: &mut UnitOfWork, category_id: DbId) -> AppResult<String> {
    match uow.categories().get_by_id(category_id).await? {
        Some(category) => Ok(category.cat_name),
        None => {
            let mut error = ValidationError::new("category_exists");
            error.message = Some(format!("category {category_id} does not exist").into());
            let mut errors = ValidationErrors::new();
            errors.add("category_id", error);
            Err(AppError::Validation(errors))
        }
    }
}

/// GET /api/v{version}/products
pub async fn list(State(state): State<AppState>) -> AppResult<(HeaderPair, Json<Vec<ProductRead>>)> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let products = uow
        .products()
        .list_with_category()
        .await?
        .into_iter()
        .map(ProductRead::from)
        .collect();
    Ok((cache_control(&state), Json(products)))
}

/// GET /api/v{version}/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<(HeaderPair, Json<ProductRead>)> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let product = uow
        .products()
        .get_with_category(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok((cache_control(&state), Json(ProductRead::from(product))))
}

/// POST /api/v{version}/products
pub async fn create(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    ValidatedJson(input): ValidatedJson<ProductCreate>,
) -> AppResult<(StatusCode, HeaderPair, Json<ProductRead>)> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let category_name = require_category(&mut uow, input.category_id).await?;

    let created = uow.products().add(&Product::from(input)).await?;
    uow.complete().await?;

    tracing::info!(
        product_id = created.id,
        category_id = created.category_id,
        %version,
        "Product created"
    );

    let location = format!("/api/v{version}/products/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProductRead::from_product(&created, Some(category_name))),
    ))
}

/// PUT /api/v{version}/products/{id}
///
/// Existence is checked before the body is parsed, so an unknown id answers
/// 404 whatever the payload.
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    body: Bytes,
) -> AppResult<StatusCode> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let mut product = uow
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let input: ProductUpdate = parse_validated(&body)?;
    require_category(&mut uow, input.category_id).await?;

    input.apply_to(&mut product);
    uow.products().update(&product).await?;
    uow.complete().await?;

    tracing::info!(product_id = id, "Product updated");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v{version}/products/{id}
///
/// Applies a JSON patch document to the product's patchable fields, then
/// validates the result with the same rules as a full update.
pub async fn patch(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    body: Bytes,
) -> AppResult<StatusCode> {
    let Some(operations) = parse_json::<Option<PatchDocument>>(&body)? else {
        return Err(AppError::BadRequest("Invalid patch document.".to_string()));
    };

    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let mut product = uow
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let patched = apply_patch(&ProductPatch::from(&product), &operations)?;
    patched.validate()?;
    if patched.category_id != product.category_id {
        require_category(&mut uow, patched.category_id).await?;
    }

    patched.apply_to(&mut product);
    uow.products().update(&product).await?;
    uow.complete().await?;

    tracing::info!(product_id = id, operations = operations.len(), "Product patched");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v{version}/products/{id}
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<StatusCode> {
    let mut uow = UnitOfWork::begin(&state.pool).await?;
    let product = uow
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !uow.products().delete(&product).await? {
        return Err(not_found(id));
    }
    uow.complete().await?;

    tracing::info!(product_id = id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
