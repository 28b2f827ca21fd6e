//! JSON body extraction with error mapping and DTO validation.
//!
//! Axum's stock `Json` rejection answers with 415/422 and a plain-text body;
//! these helpers convert every body problem into [`AppError`] so clients get
//! the same 400 JSON shape as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use catalog_core::types::DbId;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Deserialize a JSON body.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}

/// Deserialize a JSON body and run its `validator` rules.
pub fn parse_validated<T: DeserializeOwned + Validate>(body: &[u8]) -> AppResult<T> {
    let value: T = parse_json(body)?;
    value.validate()?;
    Ok(value)
}

/// Extractor for a JSON body that must pass validation before the handler runs.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CategoryCreate>) -> AppResult<...> { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Extractor for a numeric `{id}` path segment.
///
/// A segment that is not an integer answers 400 with the usual JSON body
/// instead of axum's plain-text rejection.
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(IdPath(id))
    }
}
