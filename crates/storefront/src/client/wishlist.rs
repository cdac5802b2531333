//! Per-product wishlist hearts.
//!
//! Held only for the lifetime of the page; nothing here is persisted or
//! shared with the cart.

use std::collections::HashSet;

use shreck_core::ProductId;

/// Label of an inactive wishlist button.
pub const INACTIVE_LABEL: &str = "♡";
/// Label of an active wishlist button.
pub const ACTIVE_LABEL: &str = "♥";

/// Products whose wishlist button is pressed.
#[derive(Debug, Clone, Default)]
pub struct Wishlist {
    active: HashSet<ProductId>,
}

impl Wishlist {
    /// Flip the button for `id`, returning the new state.
    pub fn toggle(&mut self, id: &ProductId) -> bool {
        if self.active.remove(id) {
            false
        } else {
            self.active.insert(id.clone());
            true
        }
    }

    /// Whether the button for `id` is pressed.
    #[must_use]
    pub fn is_active(&self, id: &ProductId) -> bool {
        self.active.contains(id)
    }

    /// Button label for a state.
    #[must_use]
    pub const fn label(active: bool) -> &'static str {
        if active { ACTIVE_LABEL } else { INACTIVE_LABEL }
    }
}
