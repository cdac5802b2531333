//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] so that subtotals never drift
//! (`2 × 19.99` is exactly `39.98`). On the wire they travel as plain JSON
//! numbers, which is what the persisted cart and the catalog file contain.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Non-breaking space used between the amount and the euro sign.
const NBSP: char = '\u{a0}';

/// A unit price or computed total, currency-agnostic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in hundredths (e.g., cents).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse a price from a JSON number.
    ///
    /// Returns `None` when the number cannot be represented as a decimal.
    #[must_use]
    pub fn from_json_number(number: &serde_json::Number) -> Option<Self> {
        let text = number.to_string();
        text.parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
            .map(Self)
    }

    /// Total for `quantity` units at this price, or `None` if it does not
    /// fit in a decimal.
    #[must_use]
    pub fn checked_times(&self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Total for `quantity` units at this price, saturating at the decimal
    /// bounds.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Format as Spanish euros, e.g. `19,99 €` or `12.345,00 €`.
    ///
    /// Follows the `es-ES` convention of only grouping thousands when the
    /// integer part has at least five digits.
    #[must_use]
    pub fn to_eur_string(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{:.2}", rounded.abs());
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut out = String::with_capacity(digits.len() + 6);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&group_thousands(integer));
        out.push(',');
        out.push_str(fraction);
        out.push(NBSP);
        out.push('€');
        out
    }
}

/// Insert `.` separators into an integer digit string (`es-ES` grouping).
fn group_thousands(integer: &str) -> String {
    if integer.len() < 5 {
        return integer.to_owned();
    }

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at the decimal bounds.
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
