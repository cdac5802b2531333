//! Catalog query endpoint.
//!
//! Runs the same filter/sort pipeline as the product grid, so a client can
//! fetch the visible order instead of computing it.

use axum::{
    Json,
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use shreck_core::catalog::{CategoryFilter, FilterState, ProductCard, SortMode};
use tracing::instrument;

use super::health::JSON_UTF8;
use crate::state::AppState;

/// Query parameters mirroring the grid controls.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Category filter; `all` or absent for every category.
    pub category: Option<String>,
    /// Search term, matched case-insensitively against product names.
    pub q: Option<String>,
    /// Sort selector value; unknown values sort by popularity.
    pub sort: Option<String>,
}

impl ProductQuery {
    /// The filter state described by these parameters.
    #[must_use]
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            category: CategoryFilter::from(self.category.as_deref()),
            search: self.q.clone().unwrap_or_default(),
            sort: self
                .sort
                .as_deref()
                .map(SortMode::parse_lenient)
                .unwrap_or_default(),
        }
    }
}

/// Response body for `/api/products`.
#[derive(Debug, Serialize)]
pub struct ProductListResponse<'a> {
    pub visible_count: usize,
    pub products: Vec<&'a ProductCard>,
}

/// List catalog products in display order for the given filters.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<ProductQuery>) -> Response {
    let filter = query.filter_state();
    let outcome = state.catalog().apply(&filter);
    tracing::debug!(
        visible = outcome.visible_count(),
        hidden = outcome.hidden.len(),
        "Filtered catalog"
    );

    let body = ProductListResponse {
        visible_count: outcome.visible_count(),
        products: outcome.visible,
    };
    ([(CONTENT_TYPE, JSON_UTF8)], Json(body)).into_response()
}
