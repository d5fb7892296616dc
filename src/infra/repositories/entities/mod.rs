//! SeaORM entity definitions
//!
//! Persistence entities for the catalog. Repositories hand these models out
//! directly; mapping them to transfer objects is the calling layer's job.

pub mod category;
pub mod product;

pub use category::{
    ActiveModel as CategoryActiveModel, Entity as CategoryEntity, Model as CategoryModel,
};
pub use product::{ActiveModel as ProductActiveModel, Entity as ProductEntity, Model as ProductModel};
