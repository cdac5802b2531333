//! Spanish (`es`) alphabetical ordering for product names.
//!
//! Comparison happens in three passes, like a locale collator:
//!
//! 1. Base letters, ignoring accents and case. `ñ` is its own letter between
//!    `n` and `o`; spaces and punctuation sort before digits, digits before
//!    letters.
//! 2. Accents: an unaccented letter sorts before its accented forms.
//! 3. Case: lowercase sorts before uppercase.
//!
//! Strings that are still equal fall back to code point order so the
//! comparison is a total order.

use std::cmp::Ordering;

/// Primary weight classes.
const SEPARATOR_BASE: u32 = 0;
const DIGIT_BASE: u32 = 0x1_0000;
const LETTER_BASE: u32 = 0x2_0000;
const OTHER_BASE: u32 = 0x3_0000;

#[derive(Debug, Clone, Copy)]
struct Weight {
    primary: u32,
    accent: u8,
    upper: bool,
}

/// Strip the diacritic from a lowercase Latin letter, keeping `ñ` distinct.
///
/// Returns the base letter and an accent rank (0 for none).
fn fold_accent(ch: char) -> (char, u8) {
    match ch {
        'á' => ('a', 1),
        'à' => ('a', 2),
        'â' => ('a', 3),
        'ä' => ('a', 4),
        'é' => ('e', 1),
        'è' => ('e', 2),
        'ê' => ('e', 3),
        'ë' => ('e', 4),
        'í' => ('i', 1),
        'ì' => ('i', 2),
        'î' => ('i', 3),
        'ï' => ('i', 4),
        'ó' => ('o', 1),
        'ò' => ('o', 2),
        'ô' => ('o', 3),
        'ö' => ('o', 4),
        'ú' => ('u', 1),
        'ù' => ('u', 2),
        'û' => ('u', 3),
        'ü' => ('u', 4),
        'ç' => ('c', 1),
        other => (other, 0),
    }
}

/// Alphabet position with `ñ` slotted in after `n`.
fn letter_rank(base: char) -> Option<u32> {
    match base {
        'a'..='n' => Some(u32::from(base) - u32::from('a')),
        'ñ' => Some(14),
        'o'..='z' => Some(u32::from(base) - u32::from('a') + 1),
        _ => None,
    }
}

fn weigh(ch: char) -> Weight {
    let mut lower = ch.to_lowercase();
    let folded = match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => ch,
    };
    let upper = folded != ch;
    let (base, accent) = fold_accent(folded);

    let primary = if let Some(rank) = letter_rank(base) {
        LETTER_BASE + rank
    } else if let Some(digit) = base.to_digit(10) {
        DIGIT_BASE + digit
    } else if base.is_whitespace() || base.is_ascii_punctuation() {
        SEPARATOR_BASE + u32::from(base)
    } else {
        OTHER_BASE + u32::from(base)
    };

    Weight {
        primary,
        accent,
        upper,
    }
}

/// Compare two strings in Spanish alphabetical order.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    let left: Vec<Weight> = a.chars().map(weigh).collect();
    let right: Vec<Weight> = b.chars().map(weigh).collect();

    let primary = left
        .iter()
        .map(|w| w.primary)
        .cmp(right.iter().map(|w| w.primary));
    if primary != Ordering::Equal {
        return primary;
    }

    let accents = left
        .iter()
        .map(|w| w.accent)
        .cmp(right.iter().map(|w| w.accent));
    if accents != Ordering::Equal {
        return accents;
    }

    left.iter()
        .map(|w| w.upper)
        .cmp(right.iter().map(|w| w.upper))
        .then_with(|| a.cmp(b))
}
