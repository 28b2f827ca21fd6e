//! Row types and wire DTOs.
//!
//! Entities mirror table rows one-to-one. DTOs use camelCase on the wire and
//! accept PascalCase aliases for product fields.

pub mod category;
pub mod product;
