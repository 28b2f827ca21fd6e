pub mod category;
pub mod health;
pub mod product;

use axum::Router;

use crate::state::AppState;
use crate::version::ApiVersion;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                       list, create
/// /categories/paged                 paged list (?pageNumber=&pageSize=)
/// /categories/{id}                  get, update, delete
///
/// /v1/products, /v1.0/products      product routes, version 1.0
/// /v2/products, /v2.0/products      product routes, version 2.0
/// /products                         product routes, default version (1.0)
/// ```
///
/// Product routes are listed in [`product::router`].
pub fn api_routes() -> Router<AppState> {
    let mut router = Router::new()
        .nest("/categories", category::router())
        .nest("/products", product::router(ApiVersion::default()));

    for version in ApiVersion::ALL {
        for segment in version.path_segments() {
            router = router.nest(&format!("/{segment}/products"), product::router(version));
        }
    }

    router
}
