//! Domain layer - Catalog inputs
//!
//! Validated input types the calling layer builds before staging a new
//! category or product. Repositories never validate entity contents
//! themselves.

pub mod category;
pub mod product;

pub use category::NewCategory;
pub use product::NewProduct;
