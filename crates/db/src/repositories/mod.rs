//! Repository layer.
//!
//! [`generic::Repository`] provides CRUD for any [`generic::Entity`]; the
//! per-entity modules bind their tables and add specialised queries.
//! Repositories are only reachable through a [`UnitOfWork`], which owns the
//! transaction they run in.

pub mod category_repo;
pub mod generic;
pub mod product_repo;
pub mod unit_of_work;

pub use category_repo::CategoryRepo;
pub use generic::{Entity, Repository};
pub use product_repo::ProductRepo;
pub use unit_of_work::UnitOfWork;
