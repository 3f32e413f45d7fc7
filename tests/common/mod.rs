//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use doozie_search_lib::application::{SearchSession, SearchUseCases};
use doozie_search_lib::domain::platform::Platform;
use doozie_search_lib::domain::services::SearchBackend;
use doozie_search_lib::infrastructure::error::{ApiError, ApiResult};
use doozie_search_lib::infrastructure::{ApiService, SearchRequestBody};

/// Backend that answers searches from a queue and records every request
///
/// An empty queue answers with an empty payload.
#[derive(Default)]
pub struct ScriptedBackend {
    search_replies: Mutex<VecDeque<ApiResult<Value>>>,
    details: Mutex<Option<Value>>,
    pub searches: Mutex<Vec<SearchRequestBody>>,
    pub saved_keywords: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_search(&self, payload: Value) {
        self.search_replies.lock().unwrap().push_back(Ok(payload));
    }

    pub fn push_search_failure(&self, status: u16) {
        self.search_replies
            .lock()
            .unwrap()
            .push_back(Err(ApiError::HttpStatus {
                status,
                url: "scripted://items/search".to_string(),
                body: Some(r#"{"detail":"upstream unavailable"}"#.to_string()),
            }));
    }

    pub fn set_details(&self, payload: Value) {
        *self.details.lock().unwrap() = Some(payload);
    }

    pub fn searches(&self) -> Vec<SearchRequestBody> {
        self.searches.lock().unwrap().clone()
    }

    pub fn saved_keywords(&self) -> Vec<String> {
        self.saved_keywords.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for ScriptedBackend {
    async fn search(&self, body: &SearchRequestBody) -> ApiResult<Value> {
        self.searches.lock().unwrap().push(body.clone());
        self.search_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({})))
    }

    async fn item_details(&self, _platform: Platform, item_id: &str) -> ApiResult<Value> {
        self.details
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::HttpStatus {
                status: 404,
                url: format!("scripted://items/{item_id}"),
                body: None,
            })
    }

    async fn save_keyword(&self, keyword: &str) -> ApiResult<Value> {
        self.saved_keywords.lock().unwrap().push(keyword.to_string());
        Ok(json!({ "saved": keyword }))
    }
}

pub fn use_cases(backend: &Arc<ScriptedBackend>) -> SearchUseCases {
    let service = ApiService::new(backend.clone());
    SearchUseCases::new(service, SearchSession::new())
}

/// Rakuten + Yahoo payload with distinct prices and review data
pub fn mixed_payload() -> Value {
    json!({
        "rakuten": {
            "Items": [
                { "Item": {
                    "itemCode": "r:1",
                    "itemName": "Linen Shirt",
                    "itemPrice": 3200,
                    "reviewAverage": 4.6,
                    "reviewCount": 88,
                    "mediumImageUrls": [{ "imageUrl": "https://img.example/r1.jpg" }]
                } },
                { "Item": {
                    "itemCode": "r:2",
                    "itemName": "Work Shirt",
                    "itemPrice": "1500",
                    "reviewAverage": "3.1",
                    "reviewCount": "7"
                } }
            ]
        },
        "yahoo": {
            "hits": [
                {
                    "id": "y_1",
                    "name": "Silk Shirt",
                    "price": 12800,
                    "review": { "rating": 4.9, "count": 15 },
                    "in_stock": true
                },
                {
                    "id": "y_2",
                    "name": "Polo Shirt",
                    "price": "abc",
                    "in_stock": false
                }
            ]
        }
    })
}
