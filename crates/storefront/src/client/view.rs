//! Display data derived from client state.
//!
//! Views are rebuilt from scratch after every command; nothing here is a
//! source of truth.

use askama::Template;
use serde::Serialize;
use shreck_core::catalog::{Catalog, FilterOutcome, FilterState};
use shreck_core::{Cart, CartLine, ProductId};

/// One row in the cart drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.to_eur_string(),
            line_total: line.total().to_eur_string(),
        }
    }
}

/// Cart drawer rows fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub items: &'a [CartLineView],
}

/// Everything the header badge, hero preview, and drawer display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    /// Sum of quantities (header badge and preview).
    pub item_count: u64,
    /// Formatted subtotal.
    pub subtotal: String,
    /// Whether the "cart is empty" indicator is shown.
    pub is_empty: bool,
    /// Rendered drawer rows; empty when the cart is empty.
    pub items_html: String,
}

impl CartView {
    /// Build the view for `cart`, rendering the drawer rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows template fails to render.
    pub fn render(cart: &Cart) -> Result<Self, askama::Error> {
        let totals = cart.totals();
        let items: Vec<CartLineView> = cart.lines().iter().map(CartLineView::from).collect();
        let items_html = if items.is_empty() {
            String::new()
        } else {
            CartItemsTemplate { items: &items }.render()?
        };

        Ok(Self {
            item_count: totals.items,
            subtotal: totals.subtotal.to_eur_string(),
            is_empty: items.is_empty(),
            items,
            items_html,
        })
    }
}

/// A category filter button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryButton {
    /// Filter value (`all` or a category tag).
    pub value: String,
    /// Whether this is the active filter. Exactly one button is pressed.
    pub pressed: bool,
}

/// Product grid display state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductGridView {
    /// Product ids in display order.
    pub visible: Vec<ProductId>,
    /// Product ids hidden from the grid.
    pub hidden: Vec<ProductId>,
    /// Value of the "N products" counter.
    pub visible_count: usize,
    pub categories: Vec<CategoryButton>,
}

impl ProductGridView {
    /// Build the grid view from a pipeline run.
    #[must_use]
    pub fn new(catalog: &Catalog, state: &FilterState, outcome: &FilterOutcome<'_>) -> Self {
        let active = state.category.as_str();
        let categories = std::iter::once(shreck_core::catalog::filter::ALL_CATEGORIES)
            .chain(catalog.categories().into_iter().map(|c| c.as_str()))
            .map(|value| CategoryButton {
                value: value.to_owned(),
                pressed: value == active,
            })
            .collect();

        Self {
            visible: outcome.visible_ids().into_iter().cloned().collect(),
            hidden: outcome.hidden.iter().map(|id| (*id).clone()).collect(),
            visible_count: outcome.visible_count(),
            categories,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shreck_core::{CartProduct, Price};

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::render(&Cart::new()).unwrap();
        assert!(view.is_empty);
        assert_eq!(view.item_count, 0);
        assert_eq!(view.subtotal, "0,00\u{a0}€");
        assert!(view.items_html.is_empty());
    }

    #[test]
    fn test_cart_view_totals_and_rows() {
        let mut cart = Cart::new();
        cart.add(CartProduct::new("p1", "Camiseta", Price::from_cents(1999)));
        cart.add(CartProduct::new("p1", "Camiseta", Price::from_cents(1999)));

        let view = CartView::render(&cart).unwrap();
        assert!(!view.is_empty);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "39,98\u{a0}€");
        assert_eq!(view.items[0].line_total, "39,98\u{a0}€");
        assert_eq!(view.items[0].unit_price, "19,99\u{a0}€");
        assert!(view.items_html.contains("data-cart-item=\"p1\""));
        assert!(view.items_html.contains("Camiseta"));
        assert!(view.items_html.contains("39,98"));
    }

    #[test]
    fn test_rows_escape_product_names() {
        let mut cart = Cart::new();
        cart.add(CartProduct::new("x", "<img src=x onerror=alert(1)>", Price::from_cents(100)));

        let view = CartView::render(&cart).unwrap();
        assert!(!view.items_html.contains("<img"));
        assert!(view.items_html.contains("&lt;img"));
    }

    #[test]
    fn test_exactly_one_category_pressed() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": "p1", "name": "Camiseta", "category": "ropa", "price": 19.99},
                {"id": "p2", "name": "Gorra", "category": "accesorios", "price": 15}
            ]"#,
        )
        .unwrap();
        let state = FilterState {
            category: shreck_core::CategoryFilter::parse("ropa"),
            ..FilterState::default()
        };
        let outcome = catalog.apply(&state);
        let view = ProductGridView::new(&catalog, &state, &outcome);

        let values: Vec<_> = view.categories.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["all", "ropa", "accesorios"]);
        let pressed: Vec<_> = view
            .categories
            .iter()
            .filter(|c| c.pressed)
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(pressed, ["ropa"]);
        assert_eq!(view.visible_count, 1);
        assert_eq!(view.hidden, [ProductId::new("p2")]);
    }
}
