//! Product grid filter and sort pipeline.
//!
//! The pipeline is pure and recomputed in full for every input change: filter
//! the catalog by category and search term, then stable-sort the survivors.
//! Ties keep catalog order, so the same [`FilterState`] always produces the
//! same ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ProductCard;
use super::collate;
use crate::types::{Category, ProductId};

/// Value of the "all categories" filter button.
pub const ALL_CATEGORIES: &str = "all";

/// Category selection for the product grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Show every category.
    #[default]
    All,
    /// Show only products tagged with this category.
    Only(Category),
}

impl CategoryFilter {
    /// Parse a filter button value; empty and `all` both mean no filter.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(Category::new(value))
        }
    }

    /// Whether a product with `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }

    /// The button value for this filter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category.as_str(),
        }
    }
}

impl From<Option<&str>> for CategoryFilter {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::All, Self::parse)
    }
}

/// Ordering of the visible products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    /// Popularity, high to low.
    #[default]
    #[serde(rename = "popular")]
    Popular,
    /// Price, low to high.
    #[serde(rename = "price-asc")]
    PriceAsc,
    /// Price, high to low.
    #[serde(rename = "price-desc")]
    PriceDesc,
    /// Spanish alphabetical order.
    #[serde(rename = "name")]
    Name,
}

impl SortMode {
    /// Parse a sort selector value. Unknown values sort by popularity.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// The selector value for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Name => "name",
        }
    }

    fn compare(self, a: &ProductCard, b: &ProductCard) -> Ordering {
        match self {
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::Name => collate::compare(&a.name, &b.name),
            Self::Popular => b.popularity.cmp(&a.popularity),
        }
    }
}

/// Error for an unrecognized sort selector value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort mode: {0}")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Self::Popular),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name" => Ok(Self::Name),
            other => Err(UnknownSortMode(other.to_owned())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to the product grid pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: CategoryFilter,
    /// Raw search box contents; trimmed and lowercased when applied.
    pub search: String,
    pub sort: SortMode,
}

impl FilterState {
    /// The normalized search term.
    #[must_use]
    pub fn search_term(&self) -> String {
        self.search.trim().to_lowercase()
    }
}

/// Result of running the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome<'a> {
    /// Products to show, in display order.
    pub visible: Vec<&'a ProductCard>,
    /// Ids of products to hide, in catalog order.
    pub hidden: Vec<&'a ProductId>,
}

impl FilterOutcome<'_> {
    /// Value of the "N products" counter.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Visible product ids, in display order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<&ProductId> {
        self.visible.iter().map(|product| &product.id).collect()
    }
}

/// Filter and sort `products` (in catalog order) for `state`.
#[must_use]
pub fn apply<'a>(products: &'a [ProductCard], state: &FilterState) -> FilterOutcome<'a> {
    let term = state.search_term();

    let (mut visible, hidden): (Vec<&ProductCard>, Vec<&ProductCard>) =
        products.iter().partition(|product| {
            state.category.matches(&product.category)
                && product.name.to_lowercase().contains(&term)
        });

    visible.sort_by(|a, b| state.sort.compare(a, b));

    FilterOutcome {
        visible,
        hidden: hidden.into_iter().map(|product| &product.id).collect(),
    }
}
