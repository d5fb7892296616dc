//! Infrastructure layer - External systems integration
//!
//! This module handles all storage concerns:
//! - Database connections and migrations
//! - Repositories over the catalog entities
//! - Sessions holding staged writes
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod session;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CategoryRepository, CategoryStore, CategoryWithProducts, ProductRepository, ProductStore,
    Repository,
};
pub use session::{Session, WriteKind};
pub use unit_of_work::{CommitSummary, Persistence, UnitOfWork, UnitOfWorkFactory};
