//! Domain building blocks for the catalog service.
//!
//! Pure logic only: no database or HTTP dependencies live here.

pub mod cache;
pub mod error;
pub mod pagination;
pub mod patch;
pub mod types;
pub mod validation;
