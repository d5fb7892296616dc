//! Catalog API - categories and products behind repositories and a unit of work
//!
//! Callers obtain a unit of work per request scope, read through its
//! repositories, stage writes on them and flush everything atomically with
//! `commit`.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Validated inputs for new categories and products
//! - **infra**: Database, entities, repositories and the unit of work
//! - **types**: Paging request, metadata and paged lists
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Insert demo data, then list the third page of products
//! cargo run -- seed
//! cargo run -- products --page 3 --page-size 10
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{NewCategory, NewProduct};
pub use errors::{AppError, AppResult};
pub use infra::{Database, Persistence, UnitOfWork, UnitOfWorkFactory};
pub use types::{PageMetadata, PageRequest, PagedList};
