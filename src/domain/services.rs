//! Service seams between the access layer and the remote search service

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::platform::Platform;
use crate::infrastructure::error::ApiResult;
use crate::infrastructure::query_builder::SearchRequestBody;

/// Raw transport to the backend search service
///
/// Implementations only move JSON; shaping requests and normalizing
/// responses stays in [`crate::infrastructure::api_service::ApiService`].
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// `POST /items/search`, returns the combined marketplace payload
    async fn search(&self, body: &SearchRequestBody) -> ApiResult<Value>;

    /// `GET /items/{platform}/{item_id}`, returns one raw marketplace item
    async fn item_details(&self, platform: Platform, item_id: &str) -> ApiResult<Value>;

    /// `POST /search/save-keywords`
    async fn save_keyword(&self, keyword: &str) -> ApiResult<Value>;
}
