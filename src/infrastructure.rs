//! Infrastructure layer: configuration, logging, and the search access layer
//!
//! Outbound request shaping (sort tokens, request bodies), inbound
//! normalization, and the HTTP transport to the backend search service.

pub mod api_service;
pub mod config;
pub mod error;
pub mod http_client;
pub mod logging;
pub mod normalizer;
pub mod query_builder;
pub mod sort_mapping;

// Re-export commonly used items
pub use api_service::ApiService;
pub use config::{AppConfig, ConfigManager};
pub use error::{ApiError, ApiResult};
pub use http_client::HttpSearchBackend;
pub use logging::{get_log_directory, init_logging_with_config};
pub use normalizer::{normalize_rakuten_item, normalize_search_response, normalize_yahoo_item};
pub use query_builder::{SearchRequestBody, SearchRequestBuilder};
pub use sort_mapping::sort_token;
