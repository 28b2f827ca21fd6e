//! Category entity model and DTOs.

use catalog_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: DbId,
    pub cat_name: String,
    pub cat_order: i32,
    /// Soft-delete marker. Persisted but not used to filter any query.
    pub is_deleted: bool,
}

/// Category as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRead {
    pub id: DbId,
    pub cat_name: String,
    pub cat_order: i32,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryCreate {
    #[validate(length(min = 1, max = 50, message = "catName is required and must be at most 50 characters"))]
    pub cat_name: String,
    pub cat_order: i32,
}

/// DTO for replacing an existing category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[validate(length(min = 1, max = 50, message = "catName is required and must be at most 50 characters"))]
    pub cat_name: String,
    pub cat_order: i32,
    pub marked_as_deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_a_name() {
        let dto: CategoryCreate = serde_json::from_value(json!({ "catOrder": 3 })).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cat_name"));
    }

    #[test]
    fn create_rejects_long_name() {
        let dto = CategoryCreate {
            cat_name: "x".repeat(51),
            cat_order: 1,
        };
        assert!(dto.validate().is_err());

        let dto = CategoryCreate {
            cat_name: "x".repeat(50),
            cat_order: 1,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn update_reads_camel_case_fields() {
        let dto: CategoryUpdate = serde_json::from_value(json!({
            "catName": "Poetry",
            "catOrder": 7,
            "markedAsDeleted": true
        }))
        .unwrap();
        assert_eq!(dto.cat_name, "Poetry");
        assert_eq!(dto.cat_order, 7);
        assert!(dto.marked_as_deleted);
    }

    #[test]
    fn read_serializes_camel_case() {
        let read = CategoryRead {
            id: 4,
            cat_name: "Science".into(),
            cat_order: 1,
        };
        assert_eq!(
            serde_json::to_value(&read).unwrap(),
            json!({ "id": 4, "catName": "Science", "catOrder": 1 })
        );
    }
}
