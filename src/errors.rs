//! Centralized error handling.
//!
//! Provides a unified error type for the data-access core. Store errors are
//! classified once, at the `DbErr` boundary, so callers can tell a caller bug
//! (multiple matches, bad paging input) from a rejected write or a store that
//! is temporarily unreachable.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Application error types
/// SOLID - Open/Closed: Extend via new variants without modifying behavior
#[derive(Error, Debug)]
pub enum AppError {
    // Lookup errors
    #[error("Resource not found")]
    NotFound,

    #[error("Lookup on `{0}` matched more than one row")]
    MultipleMatches(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Write errors
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Stale entity: {0}")]
    StaleEntity(String),

    // Store availability
    #[error("Store unavailable")]
    Transient(#[source] DbErr),

    #[error("Operation timed out")]
    Timeout,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Database error")]
    Database(#[source] DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for presentation layers and logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::MultipleMatches(_) => "MULTIPLE_MATCHES",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            AppError::StaleEntity(_) => "STALE_ENTITY",
            AppError::Transient(_) => "STORE_UNAVAILABLE",
            AppError::Timeout => "TIMEOUT",
            AppError::Cancelled => "CANCELLED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether retrying the same operation may succeed.
    ///
    /// The core never retries on its own; this only informs the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Transient(_) | AppError::Timeout)
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg))
            | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return AppError::ConstraintViolation(msg)
            }
            _ => {}
        }

        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => AppError::Transient(err),
            other => AppError::Database(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn multiple_matches(table: impl Into<String>) -> Self {
        AppError::MultipleMatches(table.into())
    }

    pub fn stale(msg: impl Into<String>) -> Self {
        AppError::StaleEntity(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
