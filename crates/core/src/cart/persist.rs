//! Cart persistence codec.
//!
//! The cart is stored as a JSON array of `{id, name, price, quantity}`
//! records. Loading is deliberately lenient: stored data may come from an
//! older schema or be corrupted, so anything unreadable is skipped rather
//! than reported as an error.

use serde_json::Value;

use super::{Cart, CartLine};
use crate::types::{Price, ProductId};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "shreck_cart_v3";

/// What was found under the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing stored (or an empty value).
    Missing,
    /// A JSON array was read; see the accepted/skipped counts.
    Loaded,
    /// The value was not valid JSON. The caller should discard it.
    Corrupt,
    /// Valid JSON, but not an array.
    NotAList,
}

/// Summary of a cart load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub status: LoadStatus,
    /// Records turned into cart lines.
    pub accepted: usize,
    /// Records ignored because a required field was missing or invalid.
    pub skipped: usize,
}

impl LoadReport {
    const fn empty(status: LoadStatus) -> Self {
        Self {
            status,
            accepted: 0,
            skipped: 0,
        }
    }

    /// Whether the stored value is unreadable and should be removed.
    #[must_use]
    pub fn should_discard(&self) -> bool {
        self.status == LoadStatus::Corrupt
    }
}

/// Serialize the cart lines, in display order.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(cart: &Cart) -> Result<String, serde_json::Error> {
    serde_json::to_string(cart.lines())
}

/// Rebuild a cart from its stored form, discarding anything unreadable.
#[must_use]
pub fn load(raw: Option<&str>) -> Cart {
    load_with_report(raw).0
}

/// Like [`load`], but also reports what was accepted and skipped.
#[must_use]
pub fn load_with_report(raw: Option<&str>) -> (Cart, LoadReport) {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return (Cart::new(), LoadReport::empty(LoadStatus::Missing));
    };

    let Ok(parsed) = serde_json::from_str::<Value>(raw) else {
        return (Cart::new(), LoadReport::empty(LoadStatus::Corrupt));
    };

    let Value::Array(records) = parsed else {
        return (Cart::new(), LoadReport::empty(LoadStatus::NotAList));
    };

    let mut cart = Cart::new();
    let mut report = LoadReport::empty(LoadStatus::Loaded);
    for record in &records {
        match parse_record(record) {
            Some(line) => {
                cart.upsert(line);
                report.accepted += 1;
            }
            None => report.skipped += 1,
        }
    }

    (cart, report)
}

fn parse_record(record: &Value) -> Option<CartLine> {
    let fields = record.as_object()?;

    let id = non_empty_str(fields.get("id")?)?;
    let name = non_empty_str(fields.get("name")?)?;
    let unit_price = match fields.get("price")? {
        Value::Number(number) => Price::from_json_number(number)?,
        _ => return None,
    };
    let quantity = positive_count(fields.get("quantity")?)?;
    // A line whose total cannot be represented is as unreadable as a bad field
    unit_price.checked_times(quantity)?;

    Some(CartLine {
        id: ProductId::new(id),
        name: name.to_owned(),
        unit_price,
        quantity,
    })
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// A strictly positive whole count. `2.0` is accepted, `1.5` and `0` are not.
fn positive_count(value: &Value) -> Option<u32> {
    let Value::Number(number) = value else {
        return None;
    };

    if let Some(count) = number.as_u64() {
        return u32::try_from(count).ok().filter(|count| *count > 0);
    }

    let count = number.as_f64()?;
    if count >= 1.0 && count.fract().abs() < f64::EPSILON && count <= f64::from(u32::MAX) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // range checked above
        let whole = count as u32;
        return Some(whole);
    }
    None
}
