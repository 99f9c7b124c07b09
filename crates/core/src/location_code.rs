//! Parse/format boundary for location-quantity pairs.
//!
//! The inventory API encodes a component's storage spread as a string like
//! `"L01:5,L02:3"`, and the report pages display an item's spread as
//! `"L01(5)"` entries. Both encodings go through [`LocationQuantity`] so no
//! other module touches the string forms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Quantity;

/// Quantity of one item held at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuantity {
    pub location_code: String,
    pub quantity: Quantity,
}

impl LocationQuantity {
    pub fn new(location_code: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            location_code: location_code.into(),
            quantity,
        }
    }
}

/// Display form used by the item report: `code(qty)`.
impl fmt::Display for LocationQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.location_code, self.quantity)
    }
}

/// Parse the leading integer of `input`, the way a browser number field
/// does: surrounding whitespace is ignored, an optional sign is accepted,
/// and parsing stops at the first non-digit. Returns `None` when no digit
/// is found or the value overflows.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Decode an API location list such as `"L01:5, L02:3"`.
///
/// Tokens are split on commas and trimmed; each token splits on its first
/// colon into code and quantity. A missing or non-numeric quantity reads as
/// zero. Tokens with an empty code are dropped. Order is preserved.
pub fn parse_location_list(raw: &str) -> Vec<LocationQuantity> {
    raw.split(',')
        .filter_map(|token| {
            let token = token.trim();
            let (code, qty) = match token.split_once(':') {
                Some((code, qty)) => (code, qty),
                None => (token, ""),
            };
            if code.is_empty() {
                return None;
            }
            Some(LocationQuantity::new(code, parse_leading_int(qty).unwrap_or(0)))
        })
        .collect()
}

/// Join display forms with `separator`, e.g. `"L01(5)\nL02(3)"`.
pub fn join_display(entries: &[LocationQuantity], separator: &str) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}
