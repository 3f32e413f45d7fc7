//! Unified search parameters shared by the filter panel, sort selector,
//! pagination and the access layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fields results can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Price,
    ReviewAverage,
    ReviewCount,
}

impl SortField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::ReviewAverage => "reviewAverage",
            Self::ReviewCount => "reviewCount",
        }
    }
}

impl FromStr for SortField {
    type Err = InvalidSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(Self::Price),
            "reviewAverage" => Ok(Self::ReviewAverage),
            "reviewCount" => Ok(Self::ReviewCount),
            other => Err(InvalidSortOption(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = InvalidSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(InvalidSortOption(other.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid sort option '{0}'")]
pub struct InvalidSortOption(pub String);

/// One entry of the sort selector, e.g. `price-asc`
///
/// `field == None` is "Default Sorting", encoded as `-` or `default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOption {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortOption {
    /// Options offered by the sort selector, in display order
    pub const CHOICES: [(Self, &'static str); 7] = [
        (Self { field: None, direction: SortDirection::Desc }, "Default Sorting"),
        (Self { field: Some(SortField::Price), direction: SortDirection::Asc }, "Price: Low to High"),
        (Self { field: Some(SortField::Price), direction: SortDirection::Desc }, "Price: High to Low"),
        (Self { field: Some(SortField::ReviewAverage), direction: SortDirection::Desc }, "Review Average: High to Low"),
        (Self { field: Some(SortField::ReviewAverage), direction: SortDirection::Asc }, "Review Average: Low to High"),
        (Self { field: Some(SortField::ReviewCount), direction: SortDirection::Desc }, "Review Count: High to Low"),
        (Self { field: Some(SortField::ReviewCount), direction: SortDirection::Asc }, "Review Count: Low to High"),
    ];
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{}-{}", field.as_str(), self.direction.as_str()),
            None => f.write_str("-"),
        }
    }
}

impl FromStr for SortOption {
    type Err = InvalidSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "-" || s.eq_ignore_ascii_case("default") {
            return Ok(Self::default());
        }

        let (field, direction) = s
            .split_once('-')
            .ok_or_else(|| InvalidSortOption(s.to_string()))?;
        let direction = if direction.is_empty() {
            SortDirection::default()
        } else {
            direction.parse()?
        };

        Ok(Self {
            field: Some(field.parse()?),
            direction,
        })
    }
}

/// Current search filters held by the page session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub keyword: String,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort: Option<SortField>,
    pub sort_direction: SortDirection,
    pub page: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            min_price: None,
            max_price: None,
            sort: None,
            sort_direction: SortDirection::Desc,
            page: 1,
        }
    }
}

impl SearchParams {
    /// Parameters for a plain keyword search with default sorting
    pub fn with_keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    /// True when the keyword has visible characters
    #[must_use]
    pub fn has_keyword(&self) -> bool {
        !self.keyword.trim().is_empty()
    }

    #[must_use]
    pub const fn sort_option(&self) -> SortOption {
        SortOption {
            field: self.sort,
            direction: self.sort_direction,
        }
    }

    /// Merge a partial update; fields left as `None` keep their value
    pub fn apply(&mut self, update: SearchParamsUpdate) {
        if let Some(keyword) = update.keyword {
            self.keyword = keyword;
        }
        if let Some(min_price) = update.min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = update.max_price {
            self.max_price = max_price;
        }
        if let Some(sort) = update.sort {
            self.sort = sort;
        }
        if let Some(direction) = update.sort_direction {
            self.sort_direction = direction;
        }
        if let Some(page) = update.page {
            self.page = page;
        }
    }
}

/// Partial update of [`SearchParams`]
///
/// Nullable fields use a nested `Option` so an update can clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParamsUpdate {
    pub keyword: Option<String>,
    pub min_price: Option<Option<i64>>,
    pub max_price: Option<Option<i64>>,
    pub sort: Option<Option<SortField>>,
    pub sort_direction: Option<SortDirection>,
    pub page: Option<u32>,
}

impl SearchParamsUpdate {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sort(option: SortOption) -> Self {
        Self {
            sort: Some(option.field),
            sort_direction: Some(option.direction),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn min_price(min_price: Option<i64>) -> Self {
        Self {
            min_price: Some(min_price),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn max_price(max_price: Option<i64>) -> Self {
        Self {
            max_price: Some(max_price),
            ..Self::default()
        }
    }
}
