//! Plain-text rendering for the terminal front end

use std::fmt::Write as _;

use crate::application::result_view::{NO_RESULTS_HINT, NO_RESULTS_TITLE, ResultView};
use crate::domain::product::NormalizedProduct;
use crate::domain::search_params::{SearchParams, SortOption};
use crate::infrastructure::normalizer::UNKNOWN_PRODUCT_NAME;

pub const CARD_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";
pub const DETAIL_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x400?text=No+Image";

pub const TITLE: &str = "E-Commerce Product Search";

pub const HELP: &str = "\
Commands:
  search <keyword...>       search both marketplaces
  min <n> | min -           set or clear the minimum price
  max <n> | max -           set or clear the maximum price
  filter                    apply the price filter
  sort <field>-<dir>        price, reviewAverage or reviewCount; asc or desc
  sort default              default sorting
  next | prev | page <n>    change page
  item <platform> <itemId>  show product details
  show                      show the current results again
  help                      show this help
  quit                      exit";

/// `¥1,234`, or `¥N/A` when the price is unknown (0)
#[must_use]
pub fn format_yen(price: i64) -> String {
    if price == 0 {
        return "¥N/A".to_string();
    }
    format!("¥{}", group_thousands(price))
}

/// Decimal digits grouped by commas, e.g. `12,345,678`
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[must_use]
pub fn format_rating(review_average: f64) -> String {
    if review_average == 0.0 {
        "N/A".to_string()
    } else {
        review_average.to_string()
    }
}

fn display_name(product: &NormalizedProduct) -> &str {
    if product.name.is_empty() {
        UNKNOWN_PRODUCT_NAME
    } else {
        &product.name
    }
}

fn image_or<'a>(product: &'a NormalizedProduct, placeholder: &'a str) -> &'a str {
    if product.image_url.is_empty() {
        placeholder
    } else {
        &product.image_url
    }
}

/// One result card
#[must_use]
pub fn render_card(product: &NormalizedProduct) -> String {
    format!(
        "{name}\n  {price}  ★ {rating} ({count})\n  Platform: {platform}\n  Image: {image}\n  Link: {link}",
        name = display_name(product),
        price = format_yen(product.price),
        rating = format_rating(product.review_average),
        count = product.review_count,
        platform = product.platform.label(),
        image = image_or(product, CARD_PLACEHOLDER_IMAGE),
        link = product.detail_path(),
    )
}

/// Product details page
#[must_use]
pub fn render_details(product: &NormalizedProduct) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "← Back to Search");
    let _ = writeln!(out, "{}", display_name(product));
    let _ = writeln!(out, "¥{}", group_thousands(product.price));
    let _ = writeln!(out, "Platform: {}", product.platform.label());
    let _ = writeln!(out, "Shop: {}", product.shop_name);
    let _ = writeln!(out, "Availability: {}", product.availability);
    let _ = writeln!(
        out,
        "★ {} ({} reviews)",
        product.review_average, product.review_count
    );
    let _ = writeln!(out, "Image: {}", image_or(product, DETAIL_PLACEHOLDER_IMAGE));
    if !product.description.is_empty() {
        let _ = writeln!(out, "{}", product.description);
    }
    let _ = write!(out, "Visit Product Page: {}", product.url);
    out
}

/// Filter panel and sort selector state
#[must_use]
pub fn render_controls(params: &SearchParams) -> String {
    let bound = |value: Option<i64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    let sort_label = SortOption::CHOICES
        .iter()
        .find(|(option, _)| *option == params.sort_option())
        .map_or("Default Sorting", |(_, label)| *label);

    format!(
        "Min Price: {}  Max Price: {}  Sort By: {}",
        bound(params.min_price),
        bound(params.max_price),
        sort_label
    )
}

/// Results area followed by the pagination bar
#[must_use]
pub fn render_view(view: &ResultView, params: &SearchParams) -> String {
    let mut out = String::new();
    match view {
        ResultView::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        ResultView::Error { message } => {
            let _ = writeln!(out, "Error! {message}");
        }
        ResultView::NoResults { .. } => {
            let _ = writeln!(out, "{NO_RESULTS_TITLE} {NO_RESULTS_HINT}");
        }
        ResultView::Results { products, .. } => {
            if let Some(summary) = view.summary() {
                let _ = writeln!(out, "{summary}");
            }
            for (index, product) in products.iter().enumerate() {
                let _ = writeln!(out, "\n[{}] {}", index + 1, render_card(product));
            }
        }
    }
    let _ = write!(out, "\n{}", render_pagination(params.page));
    out
}

#[must_use]
pub fn render_pagination(page: u32) -> String {
    let previous = if page <= 1 { "(Previous)" } else { "Previous" };
    format!("{previous}  Page {page}  Next")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::platform::Platform;
    use crate::domain::search_params::{SortDirection, SortField};
    use rstest::rstest;
    use serde_json::Value;

    fn product() -> NormalizedProduct {
        NormalizedProduct {
            item_id: "shop-a:1001".to_string(),
            name: "Oxford Shirt".to_string(),
            price: 4980,
            image_url: String::new(),
            review_average: 4.5,
            review_count: 31,
            platform: Platform::Rakuten,
            url: "https://item.rakuten.example/shop-a/1001/".to_string(),
            description: "Cotton".to_string(),
            shop_name: "Shop A".to_string(),
            availability: "1".to_string(),
            original_data: Value::Null,
        }
    }

    #[rstest]
    #[case(0, "¥N/A")]
    #[case(7, "¥7")]
    #[case(980, "¥980")]
    #[case(4980, "¥4,980")]
    #[case(1_234_567, "¥1,234,567")]
    #[case(-2500, "¥-2,500")]
    fn yen_formatting(#[case] price: i64, #[case] expected: &str) {
        assert_eq!(format_yen(price), expected);
    }

    #[test]
    fn rating_shows_na_for_zero() {
        assert_eq!(format_rating(0.0), "N/A");
        assert_eq!(format_rating(4.5), "4.5");
        assert_eq!(format_rating(4.0), "4");
    }

    #[test]
    fn card_uses_placeholder_and_detail_link() {
        let card = render_card(&product());
        assert!(card.contains("¥4,980"));
        assert!(card.contains("★ 4.5 (31)"));
        assert!(card.contains("Platform: Rakuten"));
        assert!(card.contains(CARD_PLACEHOLDER_IMAGE));
        assert!(card.contains("/item/rakuten/shop-a:1001"));
    }

    #[test]
    fn details_use_large_placeholder() {
        let details = render_details(&product());
        assert!(details.contains(DETAIL_PLACEHOLDER_IMAGE));
        assert!(details.contains("Shop: Shop A"));
        assert!(details.contains("Availability: 1"));
        assert!(details.ends_with("https://item.rakuten.example/shop-a/1001/"));
    }

    #[test]
    fn zero_price_reads_n_a_on_cards_only() {
        let free = NormalizedProduct {
            price: 0,
            ..product()
        };
        assert!(render_card(&free).contains("¥N/A"));

        let details = render_details(&free);
        assert!(details.contains("\n¥0\n"));
        assert!(!details.contains("¥N/A"));
    }

    #[test]
    fn controls_show_sort_label() {
        let params = SearchParams {
            min_price: Some(1000),
            sort: Some(SortField::ReviewCount),
            sort_direction: SortDirection::Asc,
            ..SearchParams::with_keyword("shirt")
        };
        assert_eq!(
            render_controls(&params),
            "Min Price: 1000  Max Price: -  Sort By: Review Count: Low to High"
        );
    }

    #[test]
    fn view_rendering_per_state() {
        let params = SearchParams::with_keyword("shirt");

        let results = ResultView::Results {
            keyword: "shirt".to_string(),
            products: vec![product()],
        };
        let text = render_view(&results, &params);
        assert!(text.starts_with("Showing 1 results for \"shirt\""));
        assert!(text.ends_with("(Previous)  Page 1  Next"));

        let no_results = ResultView::NoResults {
            keyword: "shirt".to_string(),
        };
        assert!(render_view(&no_results, &params).starts_with(NO_RESULTS_TITLE));

        let error = ResultView::Error {
            message: "Failed to load page. Please try again.".to_string(),
        };
        assert!(render_view(&error, &params).starts_with("Error! Failed to load page."));
    }
}
