//! Route definitions for products.

use axum::http::HeaderName;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::handlers::product;
use crate::state::AppState;
use crate::version::{ApiVersion, SUPPORTED_VERSIONS_HEADER};

/// Product routes for one API version.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> patch
/// DELETE /{id}    -> delete
/// ```
///
/// Every response advertises the supported versions.
pub fn router(version: ApiVersion) -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .patch(product::patch)
                .delete(product::delete),
        )
        .layer(Extension(version))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(SUPPORTED_VERSIONS_HEADER),
            ApiVersion::supported_header_value(),
        ))
}
