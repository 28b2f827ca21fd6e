//! Conversions between persisted entities and wire DTOs.
//!
//! Create DTOs map onto fresh entities (id 0 until the insert assigns one).
//! Update and patch DTOs map both ways: entity -> DTO to seed the shadow,
//! DTO -> entity via `apply_to` to write every mapped field back.

use crate::models::category::{Category, CategoryCreate, CategoryRead, CategoryUpdate};
use crate::models::product::{
    Product, ProductCreate, ProductPatch, ProductRead, ProductUpdate, ProductWithCategory,
};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

impl From<&Category> for CategoryRead {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            cat_name: c.cat_name.clone(),
            cat_order: c.cat_order,
        }
    }
}

impl From<CategoryCreate> for Category {
    fn from(dto: CategoryCreate) -> Self {
        Self {
            id: 0,
            cat_name: dto.cat_name,
            cat_order: dto.cat_order,
            is_deleted: false,
        }
    }
}

impl From<&Category> for CategoryUpdate {
    fn from(c: &Category) -> Self {
        Self {
            cat_name: c.cat_name.clone(),
            cat_order: c.cat_order,
            marked_as_deleted: c.is_deleted,
        }
    }
}

impl CategoryUpdate {
    /// Overwrite every mapped field of `category`. The id is left untouched.
    pub fn apply_to(&self, category: &mut Category) {
        category.cat_name = self.cat_name.clone();
        category.cat_order = self.cat_order;
        category.is_deleted = self.marked_as_deleted;
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

impl From<ProductWithCategory> for ProductRead {
    fn from(p: ProductWithCategory) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            author: p.author,
            price: p.price,
            category_id: p.category_id,
            category_name: p.category_name,
        }
    }
}

impl ProductRead {
    /// Build a read DTO from a bare entity plus the already-known category name.
    pub fn from_product(p: &Product, category_name: Option<String>) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            description: p.description.clone(),
            author: p.author.clone(),
            price: p.price,
            category_id: p.category_id,
            category_name,
        }
    }
}

impl From<ProductCreate> for Product {
    fn from(dto: ProductCreate) -> Self {
        Self {
            id: 0,
            title: dto.title,
            description: dto.description,
            author: dto.author,
            price: dto.price,
            category_id: dto.category_id,
        }
    }
}

impl From<&Product> for ProductUpdate {
    fn from(p: &Product) -> Self {
        Self {
            title: p.title.clone(),
            description: p.description.clone(),
            author: p.author.clone(),
            price: p.price,
            category_id: p.category_id,
        }
    }
}

impl ProductUpdate {
    /// Overwrite every mapped field of `product`. The id is left untouched.
    pub fn apply_to(&self, product: &mut Product) {
        product.title = self.title.clone();
        product.description = self.description.clone();
        product.author = self.author.clone();
        product.price = self.price;
        product.category_id = self.category_id;
    }
}

impl From<&Product> for ProductPatch {
    fn from(p: &Product) -> Self {
        Self {
            title: p.title.clone(),
            description: p.description.clone(),
            author: p.author.clone(),
            price: p.price,
            category_id: p.category_id,
        }
    }
}

impl ProductPatch {
    /// Copy every patchable field onto `product`, touched by the patch or not.
    pub fn apply_to(&self, product: &mut Product) {
        product.title = self.title.clone();
        product.description = self.description.clone();
        product.author = self.author.clone();
        product.price = self.price;
        product.category_id = self.category_id;
    }
}
