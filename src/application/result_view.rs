//! Client-side filter/sort transform and the derived result view
//!
//! Recomputed from scratch from the fetched results and the current params
//! every time either changes; nothing here talks to the network.

use serde::Serialize;

use crate::application::state::SearchState;
use crate::domain::product::NormalizedProduct;
use crate::domain::search_params::{SearchParams, SortDirection};

pub const NO_RESULTS_TITLE: &str = "No results found!";
pub const NO_RESULTS_HINT: &str = "Try a different search term or adjust your filters.";

/// Filter by the inclusive price range, then order by the sort field
///
/// The sort is stable: equal keys keep their fetch order. With no sort field
/// the fetch order is kept as is.
#[must_use]
pub fn apply_filters_and_sort(
    results: &[NormalizedProduct],
    params: &SearchParams,
) -> Vec<NormalizedProduct> {
    let mut filtered: Vec<NormalizedProduct> = results
        .iter()
        .filter(|item| within_price_range(item.price, params.min_price, params.max_price))
        .cloned()
        .collect();

    if let Some(field) = params.sort {
        filtered.sort_by(|a, b| match params.sort_direction {
            SortDirection::Asc => a.cmp_by(b, field),
            SortDirection::Desc => b.cmp_by(a, field),
        });
    }

    filtered
}

/// Inclusive bounds check; an unset bound is open
#[must_use]
pub fn within_price_range(price: i64, min_price: Option<i64>, max_price: Option<i64>) -> bool {
    min_price.is_none_or(|min| price >= min) && max_price.is_none_or(|max| price <= max)
}

/// What the results area shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResultView {
    Loading,
    Error { message: String },
    NoResults { keyword: String },
    Results {
        keyword: String,
        products: Vec<NormalizedProduct>,
    },
}

impl ResultView {
    /// Derive the view from the session state
    #[must_use]
    pub fn from_state(state: &SearchState) -> Self {
        if state.is_loading {
            return Self::Loading;
        }
        if let Some(message) = &state.error {
            return Self::Error {
                message: message.clone(),
            };
        }

        let products = apply_filters_and_sort(&state.results, &state.params);
        if products.is_empty() && !state.params.keyword.is_empty() {
            return Self::NoResults {
                keyword: state.params.keyword.clone(),
            };
        }

        Self::Results {
            keyword: state.params.keyword.clone(),
            products,
        }
    }

    /// `Showing N results for "KEYWORD"`, only when there is something to show
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        match self {
            Self::Results { keyword, products } if !products.is_empty() => Some(format!(
                "Showing {} results for \"{}\"",
                products.len(),
                keyword
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::platform::Platform;
    use crate::domain::search_params::SortField;
    use proptest::prelude::*;
    use serde_json::Value;

    fn product(id: &str, price: i64, review_average: f64, review_count: i64) -> NormalizedProduct {
        NormalizedProduct {
            item_id: id.to_string(),
            name: id.to_string(),
            price,
            image_url: String::new(),
            review_average,
            review_count,
            platform: Platform::Yahoo,
            url: String::new(),
            description: String::new(),
            shop_name: String::new(),
            availability: "Available".to_string(),
            original_data: Value::Null,
        }
    }

    fn ids(products: &[NormalizedProduct]) -> Vec<&str> {
        products.iter().map(|p| p.item_id.as_str()).collect()
    }

    fn sample() -> Vec<NormalizedProduct> {
        vec![
            product("a", 3000, 4.1, 10),
            product("b", 1000, 4.8, 3),
            product("c", 5000, 3.2, 40),
            product("d", 1000, 0.0, 0),
        ]
    }

    #[test]
    fn bounds_are_inclusive() {
        let params = SearchParams {
            min_price: Some(1000),
            max_price: Some(3000),
            ..SearchParams::with_keyword("x")
        };
        assert_eq!(ids(&apply_filters_and_sort(&sample(), &params)), ["a", "b", "d"]);
    }

    #[test]
    fn no_sort_keeps_fetch_order() {
        let params = SearchParams::with_keyword("x");
        assert_eq!(ids(&apply_filters_and_sort(&sample(), &params)), ["a", "b", "c", "d"]);
    }

    #[test]
    fn price_ascending_is_stable_for_ties() {
        let params = SearchParams {
            sort: Some(SortField::Price),
            sort_direction: SortDirection::Asc,
            ..SearchParams::with_keyword("x")
        };
        assert_eq!(ids(&apply_filters_and_sort(&sample(), &params)), ["b", "d", "a", "c"]);
    }

    #[test]
    fn descending_reverses_distinct_keys() {
        let mut params = SearchParams {
            sort: Some(SortField::ReviewCount),
            sort_direction: SortDirection::Asc,
            ..SearchParams::with_keyword("x")
        };
        let asc = ids(&apply_filters_and_sort(&sample(), &params))
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        params.sort_direction = SortDirection::Desc;
        let mut desc = ids(&apply_filters_and_sort(&sample(), &params))
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        desc.reverse();

        assert_eq!(asc, desc);
    }

    #[test]
    fn review_average_descending() {
        let params = SearchParams {
            sort: Some(SortField::ReviewAverage),
            ..SearchParams::with_keyword("x")
        };
        assert_eq!(ids(&apply_filters_and_sort(&sample(), &params)), ["b", "a", "c", "d"]);
    }

    #[test]
    fn view_prefers_loading_then_error() {
        let mut state = SearchState {
            results: sample(),
            is_loading: true,
            error: Some("Failed to search items. Please try again.".to_string()),
            ..SearchState::default()
        };
        assert_eq!(ResultView::from_state(&state), ResultView::Loading);

        state.is_loading = false;
        assert!(matches!(ResultView::from_state(&state), ResultView::Error { .. }));
    }

    #[test]
    fn empty_filtered_list_with_keyword_is_no_results() {
        let state = SearchState {
            params: SearchParams {
                min_price: Some(100_000),
                ..SearchParams::with_keyword("shirt")
            },
            results: sample(),
            ..SearchState::default()
        };
        assert_eq!(
            ResultView::from_state(&state),
            ResultView::NoResults {
                keyword: "shirt".to_string()
            }
        );
    }

    #[test]
    fn summary_counts_filtered_products() {
        let state = SearchState {
            params: SearchParams {
                max_price: Some(1000),
                ..SearchParams::with_keyword("shirt")
            },
            results: sample(),
            ..SearchState::default()
        };
        let view = ResultView::from_state(&state);
        assert_eq!(view.summary().as_deref(), Some("Showing 2 results for \"shirt\""));

        let empty = ResultView::from_state(&SearchState::default());
        assert_eq!(empty.summary(), None);
    }

    proptest! {
        #[test]
        fn filtered_prices_stay_within_bounds(
            prices in prop::collection::vec(-1_000i64..100_000, 0..40),
            min in prop::option::of(0i64..50_000),
            max in prop::option::of(0i64..100_000),
        ) {
            let items: Vec<_> = prices
                .iter()
                .enumerate()
                .map(|(i, p)| product(&i.to_string(), *p, 0.0, 0))
                .collect();
            let params = SearchParams {
                min_price: min,
                max_price: max,
                ..SearchParams::with_keyword("x")
            };

            let filtered = apply_filters_and_sort(&items, &params);
            for item in &filtered {
                prop_assert!(within_price_range(item.price, min, max));
            }
            let expected = prices.iter().filter(|p| within_price_range(**p, min, max)).count();
            prop_assert_eq!(filtered.len(), expected);
        }

        #[test]
        fn sorted_output_is_ordered(
            prices in prop::collection::vec(0i64..10_000, 0..40),
            ascending in any::<bool>(),
        ) {
            let items: Vec<_> = prices
                .iter()
                .enumerate()
                .map(|(i, p)| product(&i.to_string(), *p, 0.0, 0))
                .collect();
            let params = SearchParams {
                sort: Some(SortField::Price),
                sort_direction: if ascending { SortDirection::Asc } else { SortDirection::Desc },
                ..SearchParams::with_keyword("x")
            };

            let sorted = apply_filters_and_sort(&items, &params);
            prop_assert_eq!(sorted.len(), items.len());
            for pair in sorted.windows(2) {
                if ascending {
                    prop_assert!(pair[0].price <= pair[1].price);
                } else {
                    prop_assert!(pair[0].price >= pair[1].price);
                }
            }
        }
    }
}
