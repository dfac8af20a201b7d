//! Calculator state record.

use super::entry::Entry;
use super::history::CalculationHistory;
use super::operation::BinaryOp;
use serde::{Deserialize, Serialize};

/// Everything the calculator knows between two inputs.
///
/// # Invariants
///
/// - `stored_value` is `Some` exactly while a binary operation is in progress
/// - `history` never exceeds its capacity
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Number being typed or the last result
    pub active_value: Entry,
    /// Left operand awaiting the pending operation
    pub stored_value: Option<f64>,
    /// Operation awaiting its right operand
    pub pending_operation: Option<BinaryOp>,
    /// Next digit starts a fresh number
    pub awaiting_new_value: bool,
    /// Trace of the last operation, or an error message
    pub expression: String,
    /// Memory register
    pub memory: f64,
    /// Completed calculations, most recent first
    pub history: CalculationHistory,
}

impl CalculatorState {
    /// Create a state with the given memory and history and default numeric
    /// fields.
    pub fn with_saved(memory: f64, history: CalculationHistory) -> Self {
        Self {
            memory,
            history,
            ..Self::default()
        }
    }

    /// Restore the numeric defaults, keeping memory and history.
    pub fn reset(&mut self) {
        self.active_value = Entry::zero();
        self.stored_value = None;
        self.pending_operation = None;
        self.awaiting_new_value = false;
        self.expression.clear();
    }

    /// Whether the error display is showing.
    pub fn is_error(&self) -> bool {
        self.active_value.is_error()
    }

    /// Whether the memory indicator should be lit.
    pub fn memory_active(&self) -> bool {
        self.memory != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HistoryEntry;

    #[test]
    fn default_state() {
        let state = CalculatorState::default();
        assert_eq!(state.active_value.as_str(), "0");
        assert_eq!(state.stored_value, None);
        assert_eq!(state.pending_operation, None);
        assert!(!state.awaiting_new_value);
        assert!(state.expression.is_empty());
        assert_eq!(state.memory, 0.0);
        assert!(state.history.is_empty());
        assert!(!state.memory_active());
    }

    #[test]
    fn reset_keeps_memory_and_history() {
        let mut history = CalculationHistory::new();
        history.record(HistoryEntry::new("1 + 1 = 2", "2"));
        let mut state = CalculatorState::with_saved(7.0, history.clone());
        state.active_value = Entry::error();
        state.stored_value = Some(3.0);
        state.pending_operation = Some(BinaryOp::Divide);
        state.awaiting_new_value = true;
        state.expression = "Cannot divide by zero".to_string();

        state.reset();

        assert_eq!(state.active_value, Entry::zero());
        assert_eq!(state.stored_value, None);
        assert_eq!(state.pending_operation, None);
        assert!(!state.awaiting_new_value);
        assert!(state.expression.is_empty());
        assert_eq!(state.memory, 7.0);
        assert_eq!(state.history, history);
    }
}
