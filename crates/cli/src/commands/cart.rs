//! Saved cart commands.
//!
//! These read the same storage key the storefront controller writes, with the
//! same leniency: unreadable records are skipped, not fatal.

use std::path::Path;

use shreck_core::Cart;
use shreck_core::cart::{self, CART_STORAGE_KEY, LoadStatus};
use shreck_storefront::client::{FileStorage, Storage, StorageError};

/// Load the saved cart from `dir`.
///
/// # Errors
///
/// Returns an error if the storage file exists but cannot be read.
pub fn load(dir: &Path) -> Result<Cart, StorageError> {
    let storage = FileStorage::new(dir);
    let raw = storage.get(CART_STORAGE_KEY)?;
    let (cart, report) = cart::load_with_report(raw.as_deref());

    match report.status {
        LoadStatus::Missing => tracing::info!("No saved cart in {}", dir.display()),
        LoadStatus::Corrupt => tracing::warn!("Saved cart is not valid JSON"),
        LoadStatus::NotAList => tracing::warn!("Saved cart is not a list"),
        LoadStatus::Loaded => {}
    }
    if report.skipped > 0 {
        tracing::warn!("Skipped {} unreadable record(s)", report.skipped);
    }

    Ok(cart)
}

/// Print the saved cart.
///
/// # Errors
///
/// Returns an error if the storage file cannot be read.
pub fn show(dir: &Path) -> Result<(), StorageError> {
    let cart = load(dir)?;

    for line in cart.lines() {
        tracing::info!(
            "{} x {} [{}] @ {} = {}",
            line.quantity,
            line.name,
            line.id,
            line.unit_price.to_eur_string(),
            line.total().to_eur_string()
        );
    }

    let totals = cart.totals();
    tracing::info!("Items: {}", totals.items);
    tracing::info!("Subtotal: {}", totals.subtotal.to_eur_string());
    Ok(())
}

/// Delete the saved cart. Succeeds if there is none.
///
/// # Errors
///
/// Returns an error if the storage file cannot be removed.
pub fn clear(dir: &Path) -> Result<(), StorageError> {
    let mut storage = FileStorage::new(dir);
    storage.remove(CART_STORAGE_KEY)?;
    tracing::info!("Cleared saved cart in {}", dir.display());
    Ok(())
}
