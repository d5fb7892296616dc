//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod base;
mod category_repository;
pub mod entities;
mod paging;
mod product_repository;

pub use base::Repository;
pub use category_repository::{CategoryRepository, CategoryStore, CategoryWithProducts};
pub use paging::paginate;
pub use product_repository::{ProductRepository, ProductStore};
