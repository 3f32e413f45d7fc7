//! Marketplace payloads to [`NormalizedProduct`]
//!
//! Upstream data is never rejected here. Missing or malformed fields fall
//! back to defaults and numbers are coerced leniently: `"1,200"` stops at the
//! comma, `"4.5/5"` reads as `4.5`, anything unreadable becomes zero.

use serde_json::Value;

use crate::domain::platform::Platform;
use crate::domain::product::NormalizedProduct;

pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";
pub const UNKNOWN_AVAILABILITY: &str = "Unknown";
pub const AVAILABLE: &str = "Available";
pub const OUT_OF_STOCK: &str = "Out of Stock";

/// Flatten a combined `/items/search` response
///
/// Rakuten items come first, then Yahoo hits, each in upstream order.
#[must_use]
pub fn normalize_search_response(mut payload: Value) -> Vec<NormalizedProduct> {
    let rakuten = take_array(&mut payload, "rakuten", "Items");
    let yahoo = take_array(&mut payload, "yahoo", "hits");

    rakuten
        .into_iter()
        .map(normalize_rakuten_item)
        .chain(yahoo.into_iter().map(normalize_yahoo_item))
        .collect()
}

/// Normalize a single item fetched from the detail endpoint
#[must_use]
pub fn normalize_item(platform: Platform, item: Value) -> NormalizedProduct {
    match platform {
        Platform::Rakuten => normalize_rakuten_item(item),
        Platform::Yahoo => normalize_yahoo_item(item),
    }
}

/// Rakuten Ichiba item, either wrapped as `{ "Item": {...} }` or bare
#[must_use]
pub fn normalize_rakuten_item(mut item: Value) -> NormalizedProduct {
    if item.get("Item").is_some_and(is_truthy) {
        item = item["Item"].take();
    }

    let image_url = first_truthy_text(&[
        first_image_url(item.get("mediumImageUrls")),
        first_image_url(item.get("smallImageUrls")),
    ]);

    NormalizedProduct {
        item_id: text_or(item.get("itemCode"), ""),
        name: text_or(item.get("itemName"), ""),
        price: coerce_int(item.get("itemPrice")),
        image_url,
        review_average: coerce_float(item.get("reviewAverage")),
        review_count: coerce_int(item.get("reviewCount")),
        platform: Platform::Rakuten,
        url: text_or(item.get("itemUrl"), ""),
        description: text_or(item.get("itemCaption"), ""),
        shop_name: text_or(item.get("shopName"), ""),
        availability: text_or(item.get("availability"), UNKNOWN_AVAILABILITY),
        original_data: item,
    }
}

/// Yahoo! Shopping `hits[]` entry
#[must_use]
pub fn normalize_yahoo_item(item: Value) -> NormalizedProduct {
    let image = item.get("image");
    let review = item.get("review");

    let availability = if item.get("in_stock").is_some_and(is_truthy) {
        AVAILABLE
    } else {
        OUT_OF_STOCK
    };

    NormalizedProduct {
        item_id: text_or(item.get("id"), ""),
        name: text_or(item.get("name"), UNKNOWN_PRODUCT_NAME),
        price: coerce_int(item.get("price")),
        image_url: first_truthy_text(&[
            image.and_then(|i| i.get("medium")),
            image.and_then(|i| i.get("small")),
        ]),
        review_average: coerce_float(review.and_then(|r| r.get("rating"))),
        review_count: coerce_int(review.and_then(|r| r.get("count"))),
        platform: Platform::Yahoo,
        url: text_or(item.get("url"), ""),
        description: text_or(item.get("description"), ""),
        shop_name: text_or(item.get("seller").and_then(|s| s.get("name")), ""),
        availability: availability.to_string(),
        original_data: item,
    }
}

fn take_array(payload: &mut Value, platform_key: &str, list_key: &str) -> Vec<Value> {
    match payload
        .get_mut(platform_key)
        .and_then(|p| p.get_mut(list_key))
        .map(Value::take)
    {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Rakuten image lists hold `{ "imageUrl": ... }` objects, or bare strings in
/// format version 2.
fn first_image_url(list: Option<&Value>) -> Option<&Value> {
    let first = list?.get(0)?;
    match first {
        Value::Object(_) => first.get("imageUrl"),
        _ => Some(first),
    }
}

fn first_truthy_text(candidates: &[Option<&Value>]) -> String {
    candidates
        .iter()
        .flatten()
        .find(|v| is_truthy(v))
        .map_or_else(String::new, |v| value_to_text(v))
}

/// Loose truthiness: null, false, 0, NaN and "" are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text of a truthy value, otherwise `default`
pub fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(v) if is_truthy(v) => value_to_text(v),
        _ => default.to_string(),
    }
}

/// Integer coercion with a zero fallback
///
/// Numbers are truncated toward zero; strings are read up to the first
/// character that cannot continue a base-10 integer.
pub fn coerce_int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map_or(0, truncate_to_i64)
        }),
        Some(Value::String(s)) => parse_int_prefix(s).unwrap_or(0),
        _ => 0,
    }
}

/// Float coercion with a zero fallback
pub fn coerce_float(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_float_prefix(s),
        _ => None,
    };
    match parsed {
        // -0.0 is falsy as well, so it normalizes to 0.0
        Some(f) if f.is_finite() && f != 0.0 => f,
        _ => 0.0,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_to_i64(f: f64) -> i64 {
    // `as` saturates at the i64 bounds
    f.trunc() as i64
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Optional exponent, only consumed when it has digits
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
