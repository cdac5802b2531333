//! CLI subcommands.

pub mod cart;
pub mod catalog;

use shreck_storefront::client::StorageError;
use shreck_storefront::state::StateError;

/// Errors from any subcommand.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Catalog(#[from] StateError),
}
