//! Page-session state container
//!
//! One [`SearchSession`] per running front end. Every control reads and
//! writes the same state; there is no coordination between overlapping
//! searches, so whichever response lands last wins.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::product::NormalizedProduct;
use crate::domain::search_params::{SearchParams, SearchParamsUpdate};

/// Everything the result view is derived from
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub params: SearchParams,
    pub results: Vec<NormalizedProduct>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Shared handle to the session's [`SearchState`]
#[derive(Debug, Clone)]
pub struct SearchSession {
    id: Uuid,
    state: Arc<RwLock<SearchState>>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: Arc::new(RwLock::new(SearchState::default())),
        }
    }

    /// Identifier used to correlate log lines of one session
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub async fn snapshot(&self) -> SearchState {
        self.state.read().await.clone()
    }

    pub async fn params(&self) -> SearchParams {
        self.state.read().await.params.clone()
    }

    /// Merge `update` into the current params and return the result
    pub async fn update_search_params(&self, update: SearchParamsUpdate) -> SearchParams {
        let mut state = self.state.write().await;
        state.params.apply(update);
        state.params.clone()
    }

    pub async fn set_search_results(&self, results: Vec<NormalizedProduct>) {
        self.state.write().await.results = results;
    }

    pub async fn set_loading(&self, is_loading: bool) {
        self.state.write().await.is_loading = is_loading;
    }

    pub async fn set_error(&self, error: Option<String>) {
        self.state.write().await.error = error;
    }

    /// Mark a request as started: loading on, previous error cleared
    pub async fn begin_request(&self) {
        let mut state = self.state.write().await;
        state.is_loading = true;
        state.error = None;
    }
}
