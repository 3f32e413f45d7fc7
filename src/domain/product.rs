//! Normalized product record shared by both marketplaces

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use super::platform::Platform;
use super::search_params::SortField;

/// Marketplace-independent product record produced by the normalizer
///
/// Built fresh for every response and never mutated afterwards; the raw
/// marketplace payload is kept verbatim in `original_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    pub item_id: String,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub review_average: f64,
    pub review_count: i64,
    pub platform: Platform,
    pub url: String,
    pub description: String,
    pub shop_name: String,
    pub availability: String,
    pub original_data: Value,
}

impl NormalizedProduct {
    /// Detail page route, `/item/{platform}/{itemId}`
    #[must_use]
    pub fn detail_path(&self) -> String {
        format!("/item/{}/{}", self.platform, self.item_id)
    }

    /// Ascending comparison of two products on `field`
    #[must_use]
    pub fn cmp_by(&self, other: &Self, field: SortField) -> Ordering {
        match field {
            SortField::Price => self.price.cmp(&other.price),
            SortField::ReviewAverage => self.review_average.total_cmp(&other.review_average),
            SortField::ReviewCount => self.review_count.cmp(&other.review_count),
        }
    }
}
