//! Unified sort selection to marketplace sort tokens
//!
//! Kept as an explicit table: the two marketplaces disagree on naming and
//! Rakuten only ranks reviews in descending order, so no formula covers it.

use crate::domain::platform::Platform;
use crate::domain::search_params::{SortDirection, SortField};

/// Tokens used when no sort field is selected
pub const RAKUTEN_DEFAULT_SORT: &str = "standard";
pub const YAHOO_DEFAULT_SORT: &str = "-score";

/// Returns the marketplace's native sort token
#[must_use]
pub const fn sort_token(
    field: Option<SortField>,
    direction: SortDirection,
    platform: Platform,
) -> &'static str {
    use SortDirection::{Asc, Desc};
    use SortField::{Price, ReviewAverage, ReviewCount};

    match (platform, field, direction) {
        (Platform::Rakuten, None, _) => RAKUTEN_DEFAULT_SORT,
        (Platform::Rakuten, Some(Price), Asc) => "+itemPrice",
        (Platform::Rakuten, Some(Price), Desc) => "-itemPrice",
        // Rakuten ranks reviews descending only
        (Platform::Rakuten, Some(ReviewAverage), _) => "-reviewAverage",
        (Platform::Rakuten, Some(ReviewCount), _) => "-reviewCount",

        (Platform::Yahoo, None, _) => YAHOO_DEFAULT_SORT,
        (Platform::Yahoo, Some(Price), Asc) => "+price",
        (Platform::Yahoo, Some(Price), Desc) => "-price",
        (Platform::Yahoo, Some(ReviewAverage), Asc) => "+review_average",
        (Platform::Yahoo, Some(ReviewAverage), Desc) => "-review_average",
        (Platform::Yahoo, Some(ReviewCount), Asc) => "+review_count",
        (Platform::Yahoo, Some(ReviewCount), Desc) => "-review_count",
    }
}
