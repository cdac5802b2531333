//! Cart state machine.
//!
//! The cart is an insertion-ordered set of [`CartLine`]s keyed by product id.
//! Every line holds a strictly positive quantity: operations that would drop a
//! quantity to zero delete the line instead. Totals are never stored; they are
//! recomputed from the lines on every call to [`Cart::totals`].

pub mod persist;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

pub use persist::{CART_STORAGE_KEY, LoadReport, LoadStatus, load, load_with_report, to_json};

/// A product as it is handed to the cart by an "add to cart" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
}

impl CartProduct {
    /// Create a new product reference.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
        }
    }
}

/// One distinct purchasable item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// Line total (`quantity × unit_price`).
    #[must_use]
    pub fn total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Values derived from the cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartTotals {
    /// Sum of all quantities.
    pub items: u64,
    /// Sum of `quantity × unit_price` across all lines.
    pub subtotal: Price,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| &line.id == id)
    }

    /// Add one unit of `product`.
    ///
    /// An existing line keeps its position, name and price and only gains one
    /// unit. Returns the quantity of the line after the add.
    pub fn add(&mut self, product: CartProduct) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine {
            id: product.id,
            name: product.name,
            unit_price: product.unit_price,
            quantity: 1,
        });
        1
    }

    /// Add one unit to an existing line. Unknown ids are ignored.
    ///
    /// Returns `true` if a line was changed.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.lines.iter_mut().find(|line| &line.id == id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Remove one unit from a line, deleting it when no units remain.
    /// Unknown ids are ignored.
    ///
    /// Returns `true` if a line was changed or deleted.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let remaining = self
            .lines
            .get(index)
            .map_or(0, |line| line.quantity.saturating_sub(1));
        if remaining == 0 {
            self.lines.remove(index);
        } else if let Some(line) = self.lines.get_mut(index) {
            line.quantity = remaining;
        }
        true
    }

    /// Delete a line regardless of its quantity.
    ///
    /// Returns the removed line, if any.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartLine> {
        self.position(id).map(|index| self.lines.remove(index))
    }

    /// Delete every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Insert a fully formed line, replacing any line with the same id in
    /// place. Lines with a zero quantity are dropped.
    pub(crate) fn upsert(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }
        match self.lines.iter_mut().find(|existing| existing.id == line.id) {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }
    }

    /// Recompute item count and subtotal from scratch.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            items: self.lines.iter().map(|line| u64::from(line.quantity)).sum(),
            subtotal: self.lines.iter().map(CartLine::total).sum(),
        }
    }
}

impl FromIterator<CartLine> for Cart {
    fn from_iter<T: IntoIterator<Item = CartLine>>(iter: T) -> Self {
        let mut cart = Self::new();
        for line in iter {
            cart.upsert(line);
        }
        cart
    }
}
