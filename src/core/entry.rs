//! The editable display buffer.
//!
//! Keeps the number being typed as text so partial states like `"3."` can be
//! shown, while only allowing transitions that keep it a valid decimal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters typed digit entry may reach.
pub const MAX_ENTRY_LEN: usize = 16;

/// Text shown while the calculator is in the error display.
pub const ERROR_TEXT: &str = "Error";

/// Text contents of the main display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry(String);

impl Default for Entry {
    fn default() -> Self {
        Self::zero()
    }
}

impl Entry {
    /// The initial `"0"` entry.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// Entry starting with a single digit.
    pub fn digit(digit: u8) -> Self {
        debug_assert!(digit <= 9);
        Self(char::from(b'0' + digit).to_string())
    }

    /// Entry for a freshly started fraction (`"0."`).
    pub fn fraction() -> Self {
        Self("0.".to_string())
    }

    /// The error marker.
    pub fn error() -> Self {
        Self(ERROR_TEXT.to_string())
    }

    /// Entry holding an already formatted result.
    pub fn from_formatted(formatted: String) -> Self {
        Self(formatted)
    }

    /// Append a typed digit.
    ///
    /// A lone `"0"` is replaced instead of extended. Returns `false` and
    /// leaves the entry untouched when the length cap would be exceeded.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        debug_assert!(digit <= 9);
        if self.0 == "0" {
            *self = Self::digit(digit);
            return true;
        }
        if self.0.len() >= MAX_ENTRY_LEN {
            return false;
        }
        self.0.push(char::from(b'0' + digit));
        true
    }

    /// Append a decimal point unless one is already present.
    pub fn push_decimal(&mut self) -> bool {
        if self.0.contains('.') {
            return false;
        }
        self.0.push('.');
        true
    }

    /// Numeric value of the entry.
    ///
    /// The error marker and anything else that does not parse reads as zero.
    pub fn value(&self) -> f64 {
        parse_number(&self.0).unwrap_or(0.0)
    }

    pub fn is_error(&self) -> bool {
        self.0 == ERROR_TEXT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse display text as a number.
///
/// Accepts everything the formatter produces, including partial entries
/// (`"3."`), signed exponents and `Infinity`.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_zero_is_replaced() {
        let mut entry = Entry::zero();
        assert!(entry.push_digit(7));
        assert_eq!(entry.as_str(), "7");
    }

    #[test]
    fn zero_after_zero_stays_single() {
        let mut entry = Entry::zero();
        entry.push_digit(0);
        assert_eq!(entry.as_str(), "0");
    }

    #[test]
    fn digits_stop_at_cap() {
        let mut entry = Entry::digit(1);
        for _ in 1..MAX_ENTRY_LEN {
            assert!(entry.push_digit(2));
        }
        assert_eq!(entry.as_str().len(), MAX_ENTRY_LEN);
        assert!(!entry.push_digit(3));
        assert_eq!(entry.as_str(), "1222222222222222");
    }

    #[test]
    fn single_decimal_point() {
        let mut entry = Entry::digit(3);
        assert!(entry.push_decimal());
        assert!(!entry.push_decimal());
        entry.push_digit(5);
        assert_eq!(entry.as_str(), "3.5");
    }

    #[test]
    fn partial_fraction_has_value() {
        let mut entry = Entry::digit(3);
        entry.push_decimal();
        assert_eq!(entry.value(), 3.0);
        assert_eq!(Entry::fraction().value(), 0.0);
    }

    #[test]
    fn error_reads_as_zero() {
        let entry = Entry::error();
        assert!(entry.is_error());
        assert_eq!(entry.value(), 0.0);
    }

    #[test]
    fn formatted_results_parse_back() {
        assert_eq!(parse_number("1.2346e+10"), Some(1.2346e10));
        assert_eq!(parse_number("-1.0000e-8"), Some(-1e-8));
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("12abc"), None);
    }
}
