//! User actions and the UI updates they produce.

use shreck_core::catalog::{CategoryFilter, SortMode};
use shreck_core::{CartProduct, ProductId};

use super::view::{CartView, ProductGridView};

/// Section scrolled to by the checkout button.
pub const CHECKOUT_SECTION: &str = "checkout";

/// Key that closes the cart drawer.
pub const ESCAPE_KEY: &str = "Escape";

/// A discrete user action (or timer tick) applied to the storefront.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// "Add to cart" button on a product card.
    AddItem(CartProduct),
    /// `+` button on a cart row.
    Increment(ProductId),
    /// `-` button on a cart row.
    Decrement(ProductId),
    /// "Quitar" button on a cart row.
    Remove(ProductId),
    /// "Vaciar" button in the drawer.
    ClearCart,
    /// Cart button in the header.
    OpenCart,
    /// Close button in the drawer.
    CloseCart,
    /// Click on the dimmed overlay behind the drawer.
    OverlayClicked,
    /// Any key press on the page, by `KeyboardEvent.key` name.
    KeyPressed(String),
    /// Checkout button in the drawer.
    Checkout,
    /// Search box contents changed.
    SetSearch(String),
    /// Sort selector changed.
    SetSort(SortMode),
    /// Category button clicked.
    SetCategory(CategoryFilter),
    /// Heart button on a product card.
    ToggleWishlist(ProductId),
    /// Once-per-second timer.
    Tick,
}

impl Command {
    /// Whether this command mutates the cart.
    #[must_use]
    pub const fn touches_cart(&self) -> bool {
        matches!(
            self,
            Self::AddItem(_)
                | Self::Increment(_)
                | Self::Decrement(_)
                | Self::Remove(_)
                | Self::ClearCart
        )
    }
}

/// A change the UI must reflect after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Cart badge, preview, subtotal, rows and empty indicator re-rendered.
    CartSynced(CartView),
    /// Product grid re-ordered and filtered.
    ProductsFiltered(ProductGridView),
    DrawerOpened,
    DrawerClosed,
    /// Confirmation message shown.
    Notified(String),
    /// Confirmation message auto-hidden.
    NotificationHidden,
    /// Scroll smoothly to a page section by id.
    ScrollTo(&'static str),
    WishlistToggled {
        id: ProductId,
        active: bool,
        label: &'static str,
    },
    /// New countdown text.
    CountdownTicked(String),
}
