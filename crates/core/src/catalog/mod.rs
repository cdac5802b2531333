//! Product catalog and the filter/sort pipeline that drives the product grid.

pub mod collate;
pub mod filter;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartProduct;
use crate::types::{Category, Price, ProductId};

pub use filter::{CategoryFilter, FilterOutcome, FilterState, SortMode, apply};

/// Errors reading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

/// A read-only catalog entry as rendered in the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    /// Higher is more popular. Any JSON number, fractions and negatives included.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub popularity: Decimal,
}

impl ProductCard {
    /// The product as handed to the cart by an "add to cart" button.
    #[must_use]
    pub fn to_cart_product(&self) -> CartProduct {
        CartProduct::new(self.id.clone(), self.name.clone(), self.price)
    }
}

/// The fixed list of products, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<ProductCard>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id.
    pub fn new(products: Vec<ProductCard>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or ids are duplicated.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<ProductCard> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Products in page order.
    #[must_use]
    pub fn products(&self) -> &[ProductCard] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&ProductCard> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&Category> {
        let mut categories: Vec<&Category> = Vec::new();
        for product in &self.products {
            if !categories.contains(&&product.category) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Run the filter/sort pipeline over this catalog.
    #[must_use]
    pub fn apply(&self, state: &FilterState) -> FilterOutcome<'_> {
        filter::apply(&self.products, state)
    }
}
