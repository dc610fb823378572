//! Filter and sort engine for the purchasable catalog.
//!
//! Owned wagons are never filtered or sorted; they are always shown in store order.
use crate::catalog::CatalogItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        value.as_str().to_string()
    }
}

/// Sort order for the available view. Wire names match the select options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Host order, untouched
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "price-low", alias = "price-ascending")]
    PriceAscending,
    #[serde(rename = "price-high", alias = "price-descending")]
    PriceDescending,
    #[serde(rename = "storage", alias = "storage-descending")]
    StorageDescending,
}

impl SortKey {
    pub const ALL: [Self; 4] = [
        Self::Default,
        Self::PriceAscending,
        Self::PriceDescending,
        Self::StorageDescending,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAscending => "price-low",
            Self::PriceDescending => "price-high",
            Self::StorageDescending => "storage",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::PriceAscending => "Price: Low to High",
            Self::PriceDescending => "Price: High to Low",
            Self::StorageDescending => "Storage Capacity",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "price-low" | "price-ascending" => Ok(Self::PriceAscending),
            "price-high" | "price-descending" => Ok(Self::PriceDescending),
            "storage" | "storage-descending" => Ok(Self::StorageDescending),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// Inclusive price bounds. `max: None` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default)]
    pub min: u64,
    #[serde(default)]
    pub max: Option<u64>,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: u64, max: Option<u64>) -> Self {
        Self { min, max }
    }

    /// Build a range from the raw text of the min/max inputs.
    ///
    /// Blank or unparsable text falls back to the default bound for that side.
    #[must_use]
    pub fn from_inputs(min: &str, max: &str) -> Self {
        Self {
            min: parse_bound(min).unwrap_or(0),
            max: parse_bound(max),
        }
    }

    #[must_use]
    pub fn contains(&self, price: u64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

fn parse_bound(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // parseInt semantics: leading digits only
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    // Only overflow can fail on a non-empty run of digits.
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Current filter selection for the available view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub price: PriceRange,
}

impl FilterState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Filter then sort the available catalog.
///
/// Every sort is stable, so ties keep host order.
#[must_use]
pub fn compute_display_list<'a>(
    available: &'a [CatalogItem],
    category: &CategoryFilter,
    price: PriceRange,
    sort: SortKey,
) -> Vec<&'a CatalogItem> {
    let mut list: Vec<&CatalogItem> = available
        .iter()
        .filter(|item| category.matches(&item.category))
        .filter(|item| price.contains(item.price))
        .collect();

    match sort {
        SortKey::Default => {}
        SortKey::PriceAscending => list.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDescending => list.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::StorageDescending => list.sort_by(|a, b| b.storage.cmp(&a.storage)),
    }
    list
}

/// Convenience wrapper over [`compute_display_list`] taking the whole filter state.
#[must_use]
pub fn display_list<'a>(available: &'a [CatalogItem], filters: &FilterState) -> Vec<&'a CatalogItem> {
    compute_display_list(available, &filters.category, filters.price, filters.sort)
}
