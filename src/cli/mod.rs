//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `seed` - Demo catalog data
//! - `categories` / `products` - Paged listings
//! - `category` / `product` - Lookup by id

pub mod args;

pub use args::{Cli, Commands};
