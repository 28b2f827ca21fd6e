//! Product entity model and DTOs.

use catalog_core::types::DbId;
use catalog_core::validation::validate_price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub author: String,
    pub price: Decimal,
    pub category_id: DbId,
}

/// A product row joined with its category's name.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductWithCategory {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub author: String,
    pub price: Decimal,
    pub category_id: DbId,
    pub category_name: Option<String>,
}

/// Product as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRead {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub author: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category_id: DbId,
    pub category_name: Option<String>,
}

/// DTO for creating a new product.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductCreate {
    #[serde(alias = "Title")]
    #[validate(length(min = 1, max = 50, message = "title is required and must be at most 50 characters"))]
    pub title: String,
    #[serde(alias = "Description")]
    #[validate(length(max = 250, message = "description must be at most 250 characters"))]
    pub description: Option<String>,
    #[serde(alias = "Author")]
    #[validate(length(min = 1, max = 50, message = "author is required and must be at most 50 characters"))]
    pub author: String,
    #[serde(alias = "Price")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[serde(alias = "CategoryId")]
    #[validate(range(min = 1, message = "categoryId is required"))]
    pub category_id: DbId,
}

/// DTO for replacing an existing product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(alias = "Title")]
    #[validate(length(min = 1, max = 50, message = "title is required and must be at most 50 characters"))]
    pub title: String,
    #[serde(alias = "Description")]
    #[validate(length(max = 250, message = "description must be at most 250 characters"))]
    pub description: Option<String>,
    #[serde(alias = "Author")]
    #[validate(length(min = 1, max = 50, message = "author is required and must be at most 50 characters"))]
    pub author: String,
    #[serde(alias = "Price")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[serde(alias = "CategoryId")]
    #[validate(range(min = 1, message = "categoryId is required"))]
    pub category_id: DbId,
}

/// Shadow of every patchable product field.
///
/// Patch documents are applied to this shape, re-validated, and then copied
/// back onto the entity in full.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[validate(length(min = 1, max = 50, message = "title is required and must be at most 50 characters"))]
    pub title: String,
    #[validate(length(max = 250, message = "description must be at most 250 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50, message = "author is required and must be at most 50 characters"))]
    pub author: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[validate(range(min = 1, message = "categoryId is required"))]
    pub category_id: DbId,
}
