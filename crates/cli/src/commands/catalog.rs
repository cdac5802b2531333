//! Catalog query command.

use std::path::Path;

use shreck_core::catalog::{CategoryFilter, FilterState, SortMode};
use shreck_storefront::state::{StateError, load_catalog};

/// Build the pipeline inputs from command-line arguments.
fn filter_state(category: Option<&str>, search: Option<String>, sort: &str) -> FilterState {
    let mode = sort.parse::<SortMode>().unwrap_or_else(|e| {
        tracing::warn!("{e}, sorting by popularity");
        SortMode::default()
    });

    FilterState {
        category: CategoryFilter::from(category),
        search: search.unwrap_or_default(),
        sort: mode,
    }
}

/// Print the catalog as the product grid would show it.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be read or parsed.
pub fn query(
    path: &Path,
    category: Option<&str>,
    search: Option<String>,
    sort: &str,
) -> Result<(), StateError> {
    let catalog = load_catalog(path)?;
    let state = filter_state(category, search, sort);
    let outcome = catalog.apply(&state);

    tracing::info!(
        "{} of {} products (category: {}, sort: {})",
        outcome.visible_count(),
        catalog.len(),
        state.category.as_str(),
        state.sort
    );
    for product in &outcome.visible {
        tracing::info!(
            "{} [{}] {} {} (popularity {})",
            product.name,
            product.id,
            product.category,
            product.price.to_eur_string(),
            product.popularity
        );
    }
    Ok(())
}
