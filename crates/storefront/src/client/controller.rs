//! The storefront controller: owns all client state and applies commands.
//!
//! Every command runs to completion synchronously. Cart commands always end
//! with the same sync step (recompute totals, re-render, persist), and filter
//! commands always rerun the whole pipeline, so views never drift from state.

use std::sync::Arc;

use shreck_core::cart::{self, CART_STORAGE_KEY, LoadStatus};
use shreck_core::catalog::{Catalog, FilterState};
use shreck_core::{Cart, ProductId};
use thiserror::Error;

use super::clock::Clock;
use super::command::{CHECKOUT_SECTION, Command, ESCAPE_KEY, Effect};
use super::countdown::Countdown;
use super::drawer::Drawer;
use super::notification::Notification;
use super::storage::Storage;
use super::view::{CartView, ProductGridView};
use super::wishlist::Wishlist;

/// Errors applying a command.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to render cart: {0}")]
    Render(#[from] askama::Error),
}

/// Client-side storefront state.
pub struct Storefront<S> {
    storage: S,
    clock: Arc<dyn Clock>,
    catalog: Catalog,
    cart: Cart,
    filters: FilterState,
    drawer: Drawer,
    notification: Notification,
    wishlist: Wishlist,
    countdown: Countdown,
    cart_view: CartView,
    grid_view: ProductGridView,
}

impl<S: Storage> Storefront<S> {
    /// Start the storefront: restore the cart from `storage`, render it,
    /// write it back, and lay out the product grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart fails to render.
    pub fn boot(mut storage: S, catalog: Catalog, clock: Arc<dyn Clock>) -> Result<Self, ClientError> {
        let cart = restore_cart(&mut storage);
        let countdown = Countdown::start(clock.now());

        let mut storefront = Self {
            storage,
            clock,
            catalog,
            cart,
            filters: FilterState::default(),
            drawer: Drawer::default(),
            notification: Notification::default(),
            wishlist: Wishlist::default(),
            countdown,
            cart_view: CartView::default(),
            grid_view: ProductGridView::default(),
        };
        storefront.sync_cart()?;
        storefront.apply_filters();
        Ok(storefront)
    }

    /// Apply one command and report what the UI must update.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart fails to render. The cart change itself
    /// has already been applied and persisted.
    pub fn dispatch(&mut self, command: Command) -> Result<Vec<Effect>, ClientError> {
        tracing::debug!(?command, touches_cart = command.touches_cart(), "Dispatching storefront command");
        let mut effects = Vec::new();

        match command {
            Command::AddItem(product) => {
                let message = format!("Añadido: {}", product.name);
                let quantity = self.cart.add(product);
                tracing::debug!(quantity, "Added to cart");

                effects.push(self.sync_cart()?);
                if self.drawer.open() {
                    effects.push(Effect::DrawerOpened);
                }
                self.notification.show(message.clone(), self.clock.now());
                effects.push(Effect::Notified(message));
            }
            Command::Increment(id) => {
                if !self.cart.increment(&id) {
                    log_missing_line("increment", &id);
                }
                effects.push(self.sync_cart()?);
            }
            Command::Decrement(id) => {
                if !self.cart.decrement(&id) {
                    log_missing_line("decrement", &id);
                }
                effects.push(self.sync_cart()?);
            }
            Command::Remove(id) => {
                if self.cart.remove(&id).is_none() {
                    log_missing_line("remove", &id);
                }
                effects.push(self.sync_cart()?);
            }
            Command::ClearCart => {
                self.cart.clear();
                effects.push(self.sync_cart()?);
            }
            Command::OpenCart => {
                if self.drawer.open() {
                    effects.push(Effect::DrawerOpened);
                }
            }
            Command::CloseCart | Command::OverlayClicked => self.close_drawer(&mut effects),
            Command::KeyPressed(key) => {
                if key == ESCAPE_KEY {
                    self.close_drawer(&mut effects);
                }
            }
            Command::Checkout => {
                self.close_drawer(&mut effects);
                effects.push(Effect::ScrollTo(CHECKOUT_SECTION));
            }
            Command::SetSearch(search) => {
                self.filters.search = search;
                effects.push(self.apply_filters());
            }
            Command::SetSort(sort) => {
                self.filters.sort = sort;
                effects.push(self.apply_filters());
            }
            Command::SetCategory(category) => {
                self.filters.category = category;
                effects.push(self.apply_filters());
            }
            Command::ToggleWishlist(id) => {
                let active = self.wishlist.toggle(&id);
                effects.push(Effect::WishlistToggled {
                    id,
                    active,
                    label: Wishlist::label(active),
                });
            }
            Command::Tick => {
                let now = self.clock.now();
                if self.notification.expire(now) {
                    effects.push(Effect::NotificationHidden);
                }
                effects.push(Effect::CountdownTicked(self.countdown.display(now)));
            }
        }

        Ok(effects)
    }

    fn close_drawer(&mut self, effects: &mut Vec<Effect>) {
        if self.drawer.close() {
            effects.push(Effect::DrawerClosed);
        }
    }

    /// Re-render the cart and write it to storage.
    fn sync_cart(&mut self) -> Result<Effect, ClientError> {
        let rendered = CartView::render(&self.cart);
        self.persist_cart();

        let view = rendered?;
        self.cart_view = view.clone();
        Ok(Effect::CartSynced(view))
    }

    /// Write-through persistence. Failures are logged; the in-memory cart
    /// stays authoritative for the session.
    fn persist_cart(&mut self) {
        let json = match cart::to_json(&self.cart) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &json) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }

    /// Rerun the filter/sort pipeline for the current filter state.
    fn apply_filters(&mut self) -> Effect {
        let outcome = self.catalog.apply(&self.filters);
        let view = ProductGridView::new(&self.catalog, &self.filters, &outcome);
        tracing::debug!(
            visible = view.visible_count,
            sort = %self.filters.sort,
            category = self.filters.category.as_str(),
            "Product grid filtered"
        );
        self.grid_view = view.clone();
        Effect::ProductsFiltered(view)
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The last rendered cart view.
    #[must_use]
    pub const fn cart_view(&self) -> &CartView {
        &self.cart_view
    }

    /// The last computed product grid.
    #[must_use]
    pub const fn grid(&self) -> &ProductGridView {
        &self.grid_view
    }

    /// Current filter inputs.
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// The catalog behind the product grid.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the cart drawer is open.
    #[must_use]
    pub const fn is_drawer_open(&self) -> bool {
        self.drawer.is_open()
    }

    /// The confirmation notification.
    #[must_use]
    pub const fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Whether the wishlist button for `id` is pressed.
    #[must_use]
    pub fn is_wishlisted(&self, id: &ProductId) -> bool {
        self.wishlist.is_active(id)
    }

    /// The deal countdown.
    #[must_use]
    pub const fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// The backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Tear down the storefront, returning its storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn log_missing_line(action: &str, id: &ProductId) {
    tracing::debug!(action, %id, "Cart command for a product not in the cart");
}

/// Load the persisted cart, discarding whatever cannot be read.
fn restore_cart<S: Storage>(storage: &mut S) -> Cart {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read stored cart, starting empty");
            None
        }
    };

    let (cart, report) = cart::load_with_report(raw.as_deref());
    match report.status {
        LoadStatus::Corrupt => {
            tracing::warn!("Stored cart is not valid JSON, discarding it");
            if let Err(e) = storage.remove(CART_STORAGE_KEY) {
                tracing::warn!(error = %e, "Failed to discard stored cart");
            }
        }
        LoadStatus::NotAList => tracing::warn!("Stored cart is not a list, starting empty"),
        LoadStatus::Loaded if report.skipped > 0 => {
            tracing::warn!(
                accepted = report.accepted,
                skipped = report.skipped,
                "Skipped unreadable stored cart records"
            );
        }
        LoadStatus::Loaded | LoadStatus::Missing => {}
    }

    tracing::debug!(lines = cart.len(), "Cart restored");
    cart
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use shreck_core::catalog::{CategoryFilter, SortMode};
    use shreck_core::{CartProduct, Price};

    use super::*;
    use crate::client::clock::ManualClock;
    use crate::client::storage::MemoryStorage;

    const CATALOG: &str = r#"[
        {"id": "p1", "name": "Camiseta", "category": "ropa", "price": 19.99, "popularity": 80},
        {"id": "p2", "name": "Sudadera oversize", "category": "ropa", "price": 49.5, "popularity": 95},
        {"id": "p3", "name": "Gorra", "category": "accesorios", "price": 15, "popularity": 60},
        {"id": "p4", "name": "Sudadera zip", "category": "ropa", "price": 39.9, "popularity": 70}
    ]"#;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_767_000_000, 0).unwrap()
    }

    fn boot_with(storage: MemoryStorage) -> (Storefront<MemoryStorage>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(t0()));
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let storefront = Storefront::boot(storage, catalog, clock.clone()).unwrap();
        (storefront, clock)
    }

    fn camiseta() -> CartProduct {
        CartProduct::new("p1", "Camiseta", Price::from_cents(1999))
    }

    fn stored_cart(storefront: &Storefront<MemoryStorage>) -> serde_json::Value {
        let raw = storefront.storage().get(CART_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_boot_with_empty_storage() {
        let (storefront, _) = boot_with(MemoryStorage::new());

        assert!(storefront.cart().is_empty());
        assert!(storefront.cart_view().is_empty);
        assert_eq!(storefront.grid().visible_count, 4);
        assert!(!storefront.is_drawer_open());
        // Boot writes the (empty) cart straight back
        assert_eq!(stored_cart(&storefront), serde_json::json!([]));
    }

    #[test]
    fn test_add_twice_opens_drawer_once_and_notifies() {
        let (mut storefront, _) = boot_with(MemoryStorage::new());

        let effects = storefront.dispatch(Command::AddItem(camiseta())).unwrap();
        assert!(matches!(effects[0], Effect::CartSynced(_)));
        assert_eq!(effects[1], Effect::DrawerOpened);
        assert_eq!(effects[2], Effect::Notified("Añadido: Camiseta".into()));

        let effects = storefront.dispatch(Command::AddItem(camiseta())).unwrap();
        assert_eq!(effects.len(), 2, "drawer already open");

        let line = storefront.cart().get(&ProductId::new("p1")).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(storefront.cart().totals().subtotal, Price::from_cents(3998));
        assert_eq!(storefront.cart_view().subtotal, "39,98\u{a0}€");
        assert_eq!(storefront.cart_view().item_count, 2);
        assert_eq!(
            stored_cart(&storefront),
            serde_json::json!([{"id": "p1", "name": "Camiseta", "price": 19.99, "quantity": 2}])
        );
    }

    #[test]
    fn test_decrement_last_unit_shows_empty_indicator() {
        let (mut storefront, _) = boot_with(MemoryStorage::new());
        storefront.dispatch(Command::AddItem(camiseta())).unwrap();

        let effects = storefront
            .dispatch(Command::Decrement(ProductId::new("p1")))
            .unwrap();
        let [Effect::CartSynced(view)] = effects.as_slice() else {
            panic!("expected a single cart sync, got {effects:?}");
        };
        assert!(view.is_empty);
        assert!(storefront.cart().is_empty());
        assert_eq!(stored_cart(&storefront), serde_json::json!([]));
    }

    #[test]
    fn test_unknown_id_still_syncs() {
        let (mut storefront, _) = boot_with(MemoryStorage::new());
        storefront.dispatch(Command::AddItem(camiseta())).unwrap();

        for command in [
            Command::Increment(ProductId::new("nope")),
            Command::Decrement(ProductId::new("nope")),
            Command::Remove(ProductId::new("nope")),
        ] {
            let effects = storefront.dispatch(command).unwrap();
            assert!(matches!(effects.as_slice(), [Effect::CartSynced(_)]));
        }
        assert_eq!(storefront.cart().get(&ProductId::new("p1")).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let (mut storefront, _) = boot_with(MemoryStorage::new());
        storefront.dispatch(Command::AddItem(camiseta())).unwrap();
        storefront.dispatch(Command::Increment(ProductId::new("p1"))).unwrap();
        storefront
            .dispatch(Command::AddItem(CartProduct::new("p3", "Gorra", Price::from_cents(1500))))
            .unwrap();

        storefront.dispatch(Command::Remove(ProductId::new("p1"))).unwrap();
        assert_eq!(storefront.cart().len(), 1);

        storefront.dispatch(Command::ClearCart).unwrap();
        assert!(storefront.cart().is_empty());
        assert!(storefront.cart_view().is_empty);
    }

    #[test]
    fn test_drawer_close_paths() {
        let (mut storefront, _) = boot_with(MemoryStorage::new());

        for close in [
            Command::CloseCart,
            Command::OverlayClicked,
            Command::KeyPressed("Escape".into()),
        ] {
            assert_eq!(storefront.dispatch(Command::OpenCart).unwrap(), [Effect::DrawerOpened]);
            assert_eq!(storefront.dispatch(close).unwrap(), [Effect::DrawerClosed]);
            assert!(!storefront.is_drawer_open());
        }

        storefront.dispatch(Command::OpenCart).unwrap();
        assert!(storefront.dispatch(Command::KeyPressed("Enter".into())).unwrap().is_empty());
        assert!(storefront.is_drawer_open());
    }

    #[test]
    fn test_checkout_closes_and_scrolls() {
        let (mut storefront, _) = boot_with(MemoryStorage::new());
        storefront.dispatch(Command::OpenCart).unwrap();

        let effects = storefront.dispatch(Command::Checkout).unwrap();
        assert_eq!(effects, [Effect::DrawerClosed, Effect::ScrollTo("checkout")]);

        let effects = storefront.dispatch(Command::Checkout).unwrap();
        assert_eq!(effects, [Effect::ScrollTo("checkout")]);
    }

    #[test]
    fn test_filter_commands_rerun_pipeline() {
        let (mut storefront, _) = boot_with(MemoryStorage::new());

        storefront
            .dispatch(Command::SetCategory(CategoryFilter::parse("ropa")))
            .unwrap();
        storefront.dispatch(Command::SetSearch("sudadera".into())).unwrap();
        let effects = storefront.dispatch(Command::SetSort(SortMode::PriceAsc)).unwrap();

        let [Effect::ProductsFiltered(grid)] = effects.as_slice() else {
            panic!("expected a grid update, got {effects:?}");
        };
        assert_eq!(grid.visible, [ProductId::new("p4"), ProductId::new("p2")]);
        assert_eq!(grid.visible_count, 2);
        assert_eq!(grid.hidden, [ProductId::new("p1"), ProductId::new("p3")]);
        assert_eq!(storefront.grid(), grid);
    }

    #[test]
    fn test_wishlist_toggle() {
        let (mut storefront, _) = boot_with(MemoryStorage::new());
        let id = ProductId::new("p3");

        let effects = storefront.dispatch(Command::ToggleWishlist(id.clone())).unwrap();
        assert_eq!(
            effects,
            [Effect::WishlistToggled {
                id: id.clone(),
                active: true,
                label: "♥"
            }]
        );
        assert!(storefront.is_wishlisted(&id));

        storefront.dispatch(Command::ToggleWishlist(id.clone())).unwrap();
        assert!(!storefront.is_wishlisted(&id));
        assert!(storefront.cart().is_empty());
    }

    #[test]
    fn test_tick_hides_latest_notification_only() {
        let (mut storefront, clock) = boot_with(MemoryStorage::new());

        storefront.dispatch(Command::AddItem(camiseta())).unwrap();
        clock.advance(Duration::milliseconds(1000));
        storefront
            .dispatch(Command::AddItem(CartProduct::new("p3", "Gorra", Price::from_cents(1500))))
            .unwrap();

        clock.advance(Duration::milliseconds(1000));
        let effects = storefront.dispatch(Command::Tick).unwrap();
        assert_eq!(effects, [Effect::CountdownTicked("05:22:58".into())]);
        assert!(storefront.notification().is_visible());

        clock.advance(Duration::milliseconds(800));
        let effects = storefront.dispatch(Command::Tick).unwrap();
        assert_eq!(effects[0], Effect::NotificationHidden);
        assert_eq!(storefront.notification().message(), Some("Añadido: Gorra"));
    }

    #[test]
    fn test_corrupt_storage_is_discarded_then_rewritten() {
        let storage = MemoryStorage::with_value(CART_STORAGE_KEY, "{{{ not json");
        let (storefront, _) = boot_with(storage);

        assert!(storefront.cart().is_empty());
        assert_eq!(stored_cart(&storefront), serde_json::json!([]));
    }

    #[test]
    fn test_boot_survives_oversized_stored_totals() {
        let raw = r#"[
            {"id": "p1", "name": "Camiseta", "price": 1e28, "quantity": 100},
            {"id": "p2", "name": "Sudadera", "price": 5e28, "quantity": 1},
            {"id": "p3", "name": "Gorra", "price": 5e28, "quantity": 1}
        ]"#;

        let booted = std::panic::catch_unwind(|| {
            boot_with(MemoryStorage::with_value(CART_STORAGE_KEY, raw))
        });
        let (storefront, _) = booted.expect("boot does not panic");

        assert_eq!(storefront.cart().len(), 2);
        assert!(storefront.cart().get(&ProductId::new("p1")).is_none());
        assert_eq!(storefront.cart_view().item_count, 2);
        // The unreadable line is gone from storage after the boot sync
        assert_eq!(stored_cart(&storefront).as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_reload_restores_cart() {
        let (mut storefront, _) = boot_with(MemoryStorage::new());
        storefront.dispatch(Command::AddItem(camiseta())).unwrap();
        storefront.dispatch(Command::AddItem(camiseta())).unwrap();
        storefront
            .dispatch(Command::AddItem(CartProduct::new("p3", "Gorra", Price::from_cents(1500))))
            .unwrap();
        let before = storefront.cart().clone();

        let (reloaded, _) = boot_with(storefront.into_storage());
        assert_eq!(reloaded.cart(), &before);
        assert_eq!(reloaded.cart_view().item_count, 3);
    }
}
