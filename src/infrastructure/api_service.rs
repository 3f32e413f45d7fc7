//! Search access layer
//!
//! Validates input, builds the marketplace query blocks, calls the backend
//! and normalizes what comes back. Failures are logged here and returned to
//! the caller, except for the two operations that degrade to "nothing".

use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::platform::Platform;
use crate::domain::product::NormalizedProduct;
use crate::domain::search_params::SearchParams;
use crate::domain::services::SearchBackend;
use crate::infrastructure::config::defaults;
use crate::infrastructure::error::{ApiError, ApiResult};
use crate::infrastructure::normalizer::{normalize_item, normalize_search_response};
use crate::infrastructure::query_builder::SearchRequestBuilder;

#[derive(Clone)]
pub struct ApiService {
    backend: Arc<dyn SearchBackend>,
    request_builder: SearchRequestBuilder,
    initial_keyword: String,
}

impl ApiService {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            backend,
            request_builder: SearchRequestBuilder::default(),
            initial_keyword: defaults::INITIAL_KEYWORD.to_string(),
        }
    }

    #[must_use]
    pub fn with_hits_per_platform(mut self, hits: u32) -> Self {
        self.request_builder = SearchRequestBuilder::new(hits);
        self
    }

    #[must_use]
    pub fn with_initial_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.initial_keyword = keyword.into();
        self
    }

    pub fn initial_keyword(&self) -> &str {
        &self.initial_keyword
    }

    /// Search both marketplaces; Rakuten items first, then Yahoo hits
    ///
    /// A blank keyword fails with [`ApiError::InvalidKeyword`] before any
    /// request is made.
    pub async fn search_items(&self, params: &SearchParams) -> ApiResult<Vec<NormalizedProduct>> {
        let result: ApiResult<Vec<NormalizedProduct>> = async {
            let body = self.request_builder.build(params)?;
            let payload = self.backend.search(&body).await?;
            Ok(normalize_search_response(payload))
        }
        .await;

        match &result {
            Ok(products) => info!(
                "Search '{}' returned {} normalized products",
                params.keyword,
                products.len()
            ),
            Err(e) => log_failure("searching items", e),
        }
        result
    }

    /// Fetch one item and normalize it with its marketplace's rules
    pub async fn get_item_details(
        &self,
        platform: Platform,
        item_id: &str,
    ) -> ApiResult<NormalizedProduct> {
        self.backend
            .item_details(platform, item_id)
            .await
            .map(|raw| normalize_item(platform, raw))
            .inspect_err(|e| log_failure(&format!("fetching {platform} item details"), e))
    }

    /// Record a keyword for recommender training
    ///
    /// Blank keywords are skipped without a request. Failures are logged and
    /// yield `None`; they never reach the user.
    pub async fn save_search_keyword(&self, keyword: &str) -> Option<Value> {
        if keyword.trim().is_empty() {
            return None;
        }

        match self.backend.save_keyword(keyword).await {
            Ok(response) => Some(response),
            Err(e) => {
                log_failure("saving search keyword", &e);
                None
            }
        }
    }

    /// Products for the first page: the initial keyword with default sorting
    ///
    /// Errors are logged and produce an empty list.
    pub async fn get_initial_products(&self) -> Vec<NormalizedProduct> {
        let params = SearchParams::with_keyword(self.initial_keyword.clone());
        match self.search_items(&params).await {
            Ok(products) => products,
            Err(e) => {
                warn!("Initial products unavailable: {}", e);
                Vec::new()
            }
        }
    }
}

fn log_failure(action: &str, e: &ApiError) {
    match (e.status(), e.response_body()) {
        (Some(status), Some(body)) => {
            error!("Error {}: {} (status {}, response {})", action, e, status, body);
        }
        _ => error!("Error {}: {}", action, e),
    }
}
