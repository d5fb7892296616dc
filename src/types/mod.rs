//! Shared types for DRY compliance.

mod pagination;

pub use pagination::{PageMetadata, PageRequest, PagedList};
