//! Test utilities for doozie-search
//!
//! An in-memory [`SearchBackend`] with canned replies that records every
//! call, so access-layer and use-case tests run without a network.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

use crate::domain::platform::Platform;
use crate::domain::services::SearchBackend;
use crate::infrastructure::api_service::ApiService;
use crate::infrastructure::error::{ApiError, ApiResult};
use crate::infrastructure::query_builder::SearchRequestBody;

/// Canned reply for one backend endpoint
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(Value),
    Status(u16),
}

impl MockReply {
    fn into_result(self, url: &str) -> ApiResult<Value> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Status(status) => Err(ApiError::HttpStatus {
                status,
                url: url.to_string(),
                body: None,
            }),
        }
    }
}

/// Calls seen by [`MockBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Search(SearchRequestBody),
    ItemDetails(Platform, String),
    SaveKeyword(String),
}

pub struct MockBackend {
    search_reply: Mutex<MockReply>,
    details_reply: Mutex<MockReply>,
    save_reply: Mutex<MockReply>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            search_reply: Mutex::new(MockReply::Json(json!({}))),
            details_reply: Mutex::new(MockReply::Status(404)),
            save_reply: Mutex::new(MockReply::Json(json!({ "status": "ok" }))),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_search_reply(&self, reply: MockReply) {
        *self.search_reply.lock().unwrap() = reply;
    }

    pub fn set_details_reply(&self, reply: MockReply) {
        *self.details_reply.lock().unwrap() = reply;
    }

    pub fn set_save_reply(&self, reply: MockReply) {
        *self.save_reply.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_bodies(&self) -> Vec<SearchRequestBody> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Search(body) => Some(body),
                _ => None,
            })
            .collect()
    }

    /// Access layer wired to this mock
    pub fn service(self: &Arc<Self>) -> ApiService {
        ApiService::new(self.clone())
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn search(&self, body: &SearchRequestBody) -> ApiResult<Value> {
        self.record(RecordedCall::Search(body.clone()));
        let reply = self.search_reply.lock().unwrap().clone();
        reply.into_result("mock://items/search")
    }

    async fn item_details(&self, platform: Platform, item_id: &str) -> ApiResult<Value> {
        self.record(RecordedCall::ItemDetails(platform, item_id.to_string()));
        let reply = self.details_reply.lock().unwrap().clone();
        reply.into_result("mock://items")
    }

    async fn save_keyword(&self, keyword: &str) -> ApiResult<Value> {
        self.record(RecordedCall::SaveKeyword(keyword.to_string()));
        let reply = self.save_reply.lock().unwrap().clone();
        reply.into_result("mock://search/save-keywords")
    }
}

/// A small combined payload: two Rakuten items and two Yahoo hits
pub fn sample_search_payload() -> Value {
    json!({
        "rakuten": {
            "Items": [
                { "Item": {
                    "itemCode": "shop-a:1001",
                    "itemName": "Oxford Shirt",
                    "itemPrice": 4980,
                    "reviewAverage": 4.2,
                    "reviewCount": 31,
                    "shopName": "Shop A",
                    "itemUrl": "https://item.rakuten.example/shop-a/1001/",
                    "mediumImageUrls": [{ "imageUrl": "https://img.example/r1.jpg" }],
                    "availability": 1
                } },
                { "Item": {
                    "itemCode": "shop-b:2002",
                    "itemName": "Flannel Shirt",
                    "itemPrice": "2980",
                    "reviewAverage": "3.9",
                    "reviewCount": "210",
                    "shopName": "Shop B"
                } }
            ]
        },
        "yahoo": {
            "hits": [
                {
                    "id": "store-c_3003",
                    "name": "Denim Shirt",
                    "price": 6500,
                    "review": { "rating": 4.8, "count": 12 },
                    "seller": { "name": "Store C" },
                    "image": { "medium": "https://y.example/c.jpg" },
                    "in_stock": true
                },
                {
                    "id": "store-d_4004",
                    "price": 1200,
                    "in_stock": false
                }
            ]
        }
    })
}
