//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::AppResult;
use crate::types::PageRequest;

/// Catalog API - categories and products over a relational store
#[derive(Parser, Debug)]
#[command(name = "catalog-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Insert a demo catalog
    Seed,

    /// List categories
    Categories(CategoriesArgs),

    /// List products
    Products(ProductsArgs),

    /// Show one category by id
    Category {
        id: i32,
    },

    /// Show one product by id
    Product {
        id: i32,
    },
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Paging flags shared by the listing commands
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, default_value_t = DEFAULT_PAGE_NUMBER)]
    pub page: u64,

    /// Items per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,
}

impl PageArgs {
    /// Build the request, clamping the size to [`MAX_PAGE_SIZE`].
    pub fn to_request(self) -> AppResult<PageRequest> {
        PageRequest::new(self.page, self.page_size.min(MAX_PAGE_SIZE))
    }
}

/// Arguments for the categories command
#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub paging: PageArgs,

    /// List every category with its products instead of a page
    #[arg(long)]
    pub with_products: bool,
}

/// Arguments for the products command
#[derive(Parser, Debug)]
pub struct ProductsArgs {
    #[command(flatten)]
    pub paging: PageArgs,

    /// List every product, cheapest first, instead of a page
    #[arg(long)]
    pub by_price: bool,
}
