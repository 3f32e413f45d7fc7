//! Domain module - Core search entities and service seams
//!
//! This module contains the value types shared by every layer: the unified
//! search parameters, the normalized product record, the marketplace tag,
//! and the trait the access layer uses to reach the remote search service.

pub mod platform;
pub mod product;
pub mod search_params;
pub mod services;

// Re-export commonly used items for convenience
pub use platform::Platform;
pub use product::NormalizedProduct;
pub use search_params::{SearchParams, SearchParamsUpdate, SortDirection, SortField, SortOption};
pub use services::SearchBackend;
