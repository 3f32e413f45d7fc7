//! HTTP transport to the backend search service
//!
//! Thin reqwest wrapper with a client-side request quota. It only moves JSON;
//! request shaping and normalization live in the api service.

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, direct::NotKeyed},
};
use reqwest::{
    Client, RequestBuilder,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::{Value, json};
use std::num::NonZeroU32;
use std::time::Duration;
use url::Url;

use crate::domain::platform::Platform;
use crate::domain::services::SearchBackend;
use crate::infrastructure::config::{ApiConfig, endpoints, utils};
use crate::infrastructure::error::{ApiError, ApiResult};
use crate::infrastructure::query_builder::SearchRequestBody;

/// reqwest-backed [`SearchBackend`]
pub struct HttpSearchBackend {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: ApiConfig,
}

impl HttpSearchBackend {
    /// Create a new backend client with the given configuration
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| ApiError::Configuration {
                message: format!("Invalid user agent: {e}"),
            })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Configuration {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        let per_second =
            NonZeroU32::new(config.max_requests_per_second).ok_or_else(|| ApiError::Configuration {
                message: "Rate limit must be greater than 0".to_string(),
            })?;
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Url::parse(&config.base_url).map_err(|e| ApiError::Configuration {
            message: format!("Invalid base URL {}: {e}", config.base_url),
        })?;

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        utils::endpoint_url(&self.config.base_url, path).map_err(|e| ApiError::Configuration {
            message: format!("Cannot build URL for {path}: {e}"),
        })
    }

    /// Send with rate limiting and decode the JSON body
    async fn send_json(&self, request: RequestBuilder, url: &Url) -> ApiResult<Value> {
        self.rate_limiter.until_ready().await;

        tracing::info!("Requesting: {}", url);

        let response = request.send().await.map_err(|source| ApiError::Network {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok().filter(|b| !b.is_empty());
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Network {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!("Response from {} ({}, {} bytes)", url, status, bytes.len());

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, body: &SearchRequestBody) -> ApiResult<Value> {
        let url = self.endpoint(endpoints::SEARCH_ITEMS)?;
        tracing::debug!(
            "Search body: {}",
            serde_json::to_string(body).unwrap_or_default()
        );
        self.send_json(self.client.post(url.clone()).json(body), &url)
            .await
    }

    async fn item_details(&self, platform: Platform, item_id: &str) -> ApiResult<Value> {
        let url = utils::item_details_url(&self.config.base_url, platform.as_str(), item_id)
            .map_err(|e| ApiError::Configuration {
                message: format!("Cannot build item URL: {e}"),
            })?;
        self.send_json(self.client.get(url.clone()), &url).await
    }

    async fn save_keyword(&self, keyword: &str) -> ApiResult<Value> {
        let url = self.endpoint(endpoints::SAVE_KEYWORDS)?;
        self.send_json(
            self.client.post(url.clone()).json(&json!({ "keyword": keyword })),
            &url,
        )
        .await
    }
}
