//! Calculation history.
//!
//! Entries are kept most-recent-first with a fixed capacity; recording past
//! the capacity evicts the oldest entry.

use super::entry::parse_number;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of entries kept.
pub const HISTORY_CAPACITY: usize = 50;

/// A single completed calculation.
///
/// # Example
///
/// ```rust
/// use abacus::core::HistoryEntry;
///
/// let entry = HistoryEntry::new("52 × 3 = 156", "156");
/// assert_eq!(entry.value(), Some(156.0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Full trace, e.g. `"52 × 3 = 156"`
    pub expression: String,
    /// Formatted result
    pub result: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// Numeric value of the result, if it is a number.
    pub fn value(&self) -> Option<f64> {
        parse_number(&self.result)
    }
}

/// Bounded, most-recent-first list of calculations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationHistory {
    entries: VecDeque<HistoryEntry>,
}

impl CalculationHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from stored entries, most recent first.
    ///
    /// Entries beyond the capacity are dropped from the tail.
    pub fn from_entries(entries: impl IntoIterator<Item = HistoryEntry>) -> Self {
        Self {
            entries: entries.into_iter().take(HISTORY_CAPACITY).collect(),
        }
    }

    /// Record a calculation at the head, evicting the oldest past capacity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus::core::{CalculationHistory, HistoryEntry};
    ///
    /// let mut history = CalculationHistory::new();
    /// history.record(HistoryEntry::new("1 + 1 = 2", "2"));
    /// history.record(HistoryEntry::new("2 + 2 = 4", "4"));
    ///
    /// assert_eq!(history.get(0).map(|e| e.result.as_str()), Some("4"));
    /// ```
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entry at `index`, where 0 is the most recent.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Entries as an owned, most-recent-first vector.
    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}
