//! Outbound request body for `POST /items/search`
//!
//! The backend fans one request out to both marketplaces, so the body holds
//! one native parameter block per platform.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::platform::Platform;
use crate::domain::search_params::SearchParams;
use crate::infrastructure::config::defaults;
use crate::infrastructure::error::{ApiError, ApiResult};
use crate::infrastructure::sort_mapping::sort_token;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RakutenQueryParameters {
    pub keyword: String,
    pub sort: String,
    pub hits: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YahooQueryParameters {
    pub query: String,
    pub sort: String,
    pub results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_to: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequestBody {
    pub rakuten_query_parameters: RakutenQueryParameters,
    pub yahoo_query_parameters: YahooQueryParameters,
    pub from_scheduler: bool,
}

/// Builds request bodies with a fixed per-platform page size
#[derive(Debug, Clone, Copy)]
pub struct SearchRequestBuilder {
    hits_per_platform: u32,
}

impl Default for SearchRequestBuilder {
    fn default() -> Self {
        Self::new(defaults::HITS_PER_PLATFORM)
    }
}

impl SearchRequestBuilder {
    #[must_use]
    pub const fn new(hits_per_platform: u32) -> Self {
        Self { hits_per_platform }
    }

    /// Build the body for `params`
    ///
    /// Fails with [`ApiError::InvalidKeyword`] when the keyword is blank; no
    /// request should be attempted in that case.
    pub fn build(&self, params: &SearchParams) -> ApiResult<SearchRequestBody> {
        if !params.has_keyword() {
            return Err(ApiError::InvalidKeyword);
        }

        let keyword = params.keyword.clone();
        let (page, start) = self.page_offsets(params.page);

        let body = SearchRequestBody {
            rakuten_query_parameters: RakutenQueryParameters {
                keyword: keyword.clone(),
                sort: sort_token(params.sort, params.sort_direction, Platform::Rakuten).to_string(),
                hits: self.hits_per_platform,
                page,
            },
            yahoo_query_parameters: YahooQueryParameters {
                query: keyword,
                sort: sort_token(params.sort, params.sort_direction, Platform::Yahoo).to_string(),
                results: self.hits_per_platform,
                start,
                price_from: params.min_price,
                price_to: params.max_price,
            },
            from_scheduler: false,
        };

        debug!(
            "Built search body: keyword={:?} rakuten_sort={} yahoo_sort={} page={}",
            body.rakuten_query_parameters.keyword,
            body.rakuten_query_parameters.sort,
            body.yahoo_query_parameters.sort,
            params.page
        );
        Ok(body)
    }

    /// Rakuten takes a page number, Yahoo a 1-based start offset.
    /// Page 1 sends neither.
    const fn page_offsets(&self, page: u32) -> (Option<u32>, Option<u32>) {
        if page <= 1 {
            return (None, None);
        }
        let start = (page - 1)
            .saturating_mul(self.hits_per_platform)
            .saturating_add(1);
        (Some(page), Some(start))
    }
}
