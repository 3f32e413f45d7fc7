//! Search page use cases
//!
//! Each operation is one user action against the page session: it flips the
//! loading flag, talks to the access layer and collapses any failure into a
//! single user-facing message stored in the session.

use tracing::{debug, error, info, warn};

use crate::application::result_view::ResultView;
use crate::application::state::SearchSession;
use crate::domain::platform::Platform;
use crate::domain::product::NormalizedProduct;
use crate::domain::search_params::{SearchParams, SearchParamsUpdate, SortOption};
use crate::infrastructure::api_service::ApiService;
use crate::infrastructure::error::{ApiError, ApiResult};

/// User-facing failure messages
pub mod messages {
    pub const SEARCH_FAILED: &str = "Failed to search items. Please try again.";
    pub const FILTER_FAILED: &str = "Failed to apply filters. Please try again.";
    pub const KEYWORD_REQUIRED: &str = "Please enter a search keyword first";
    pub const SORT_FAILED: &str = "Failed to sort items. Please try again.";
    pub const PAGE_FAILED: &str = "Failed to load page. Please try again.";
    pub const INITIAL_LOAD_FAILED: &str =
        "Failed to load initial products. Please try searching instead.";
    pub const DETAILS_FAILED: &str = "Failed to load item details. Please try again.";
}

/// Use cases bound to one page session
#[derive(Clone)]
pub struct SearchUseCases {
    service: ApiService,
    session: SearchSession,
}

impl SearchUseCases {
    pub fn new(service: ApiService, session: SearchSession) -> Self {
        Self { service, session }
    }

    pub const fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Current result view derived from the session state
    pub async fn view(&self) -> ResultView {
        ResultView::from_state(&self.session.snapshot().await)
    }

    /// Search bar submit
    ///
    /// Blank input is ignored. The search is keyword-only (default sort,
    /// first page); the keyword is recorded before results are published.
    pub async fn submit_search(&self, input: &str) {
        if input.trim().is_empty() {
            return;
        }

        self.session.begin_request().await;
        self.session
            .update_search_params(SearchParamsUpdate {
                page: Some(1),
                ..SearchParamsUpdate::keyword(input)
            })
            .await;

        match self.service.search_items(&SearchParams::with_keyword(input)).await {
            Ok(products) => {
                self.service.save_search_keyword(input).await;
                info!(
                    "🔍 [{}] '{}' -> {} products",
                    self.session.id(),
                    input,
                    products.len()
                );
                self.session.set_search_results(products).await;
            }
            Err(e) => self.fail(messages::SEARCH_FAILED, &e).await,
        }

        self.session.set_loading(false).await;
    }

    /// Edit the lower price bound; no request is made
    pub async fn set_min_price(&self, min_price: Option<i64>) {
        self.session
            .update_search_params(SearchParamsUpdate::min_price(min_price))
            .await;
    }

    /// Edit the upper price bound; no request is made
    pub async fn set_max_price(&self, max_price: Option<i64>) {
        self.session
            .update_search_params(SearchParamsUpdate::max_price(max_price))
            .await;
    }

    /// "Apply Filter": re-run the search with the current bounds and sort
    pub async fn apply_price_filter(&self) {
        let current = self.session.params().await;
        if !current.has_keyword() {
            self.session
                .set_error(Some(messages::KEYWORD_REQUIRED.to_string()))
                .await;
            return;
        }

        self.session.begin_request().await;
        self.session.update_search_params(SearchParamsUpdate::page(1)).await;

        let params = SearchParams { page: 1, ..current };
        match self.service.search_items(&params).await {
            Ok(products) => self.session.set_search_results(products).await,
            Err(e) => self.fail(messages::FILTER_FAILED, &e).await,
        }

        self.session.set_loading(false).await;
    }

    /// Sort selector change
    ///
    /// The choice is always stored; a search only follows when a keyword is
    /// already set.
    pub async fn change_sort(&self, option: SortOption) {
        let current = self
            .session
            .update_search_params(SearchParamsUpdate::sort(option))
            .await;
        if !current.has_keyword() {
            debug!("Sort set to {} without a keyword", option);
            return;
        }

        self.session.begin_request().await;
        self.session.update_search_params(SearchParamsUpdate::page(1)).await;

        let params = SearchParams { page: 1, ..current };
        match self.service.search_items(&params).await {
            Ok(products) => self.session.set_search_results(products).await,
            Err(e) => self.fail(messages::SORT_FAILED, &e).await,
        }

        self.session.set_loading(false).await;
    }

    /// Jump to `new_page`; page 0 or a missing keyword does nothing
    pub async fn change_page(&self, new_page: u32) {
        let current = self.session.params().await;
        if new_page < 1 || !current.has_keyword() {
            return;
        }

        self.session.begin_request().await;
        self.session
            .update_search_params(SearchParamsUpdate::page(new_page))
            .await;

        let params = SearchParams {
            page: new_page,
            ..current
        };
        match self.service.search_items(&params).await {
            Ok(products) => self.session.set_search_results(products).await,
            Err(e) => self.fail(messages::PAGE_FAILED, &e).await,
        }

        self.session.set_loading(false).await;
    }

    pub async fn next_page(&self) {
        let page = self.session.params().await.page;
        self.change_page(page.saturating_add(1)).await;
    }

    pub async fn previous_page(&self) {
        let page = self.session.params().await.page;
        self.change_page(page.saturating_sub(1)).await;
    }

    /// Home page load: show products for the configured initial keyword
    pub async fn load_initial_products(&self) {
        self.session.begin_request().await;

        let service = self.service.clone();
        let load = tokio::spawn(async move { service.get_initial_products().await });
        match load.await {
            Ok(products) => {
                info!(
                    "🏠 [{}] Initial products loaded: {}",
                    self.session.id(),
                    products.len()
                );
                self.session
                    .update_search_params(SearchParamsUpdate::keyword(
                        self.service.initial_keyword(),
                    ))
                    .await;
                self.session.set_search_results(products).await;
            }
            Err(e) => self.fail(messages::INITIAL_LOAD_FAILED, &e).await,
        }

        self.session.set_loading(false).await;
    }

    /// Product details page; the item is returned, not stored in the session
    ///
    /// On failure the details message is stored in the session and the typed
    /// cause is returned. An unknown platform tag fails before any request.
    pub async fn load_item_details(
        &self,
        platform: &str,
        item_id: &str,
    ) -> ApiResult<NormalizedProduct> {
        self.session.begin_request().await;

        let result: ApiResult<NormalizedProduct> = async {
            let platform = platform.parse::<Platform>().map_err(ApiError::from)?;
            self.service.get_item_details(platform, item_id).await
        }
        .await;

        if let Err(e) = &result {
            if e.is_validation() {
                warn!("[{}] Rejected details request: {}", self.session.id(), e);
                self.session
                    .set_error(Some(messages::DETAILS_FAILED.to_string()))
                    .await;
            } else {
                self.fail(messages::DETAILS_FAILED, e).await;
            }
        }

        self.session.set_loading(false).await;
        result
    }

    async fn fail(&self, message: &str, cause: &dyn std::fmt::Display) {
        error!("[{}] {}: {}", self.session.id(), message, cause);
        self.session.set_error(Some(message.to_string())).await;
    }
}
