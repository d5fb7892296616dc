//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest page the CLI asks for; larger `--page-size` values are clamped
pub const MAX_PAGE_SIZE: u64 = 50;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Response header carrying serialized page metadata
pub const PAGINATION_HEADER: &str = "X-Pagination";

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://catalog.db?mode=rwc";

/// Default size of the connection pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 8;

// =============================================================================
// Validation
// =============================================================================

/// Inclusive product price range, in whole currency units
pub const MIN_PRICE: i64 = 1;
pub const MAX_PRICE: i64 = 10_000;
