//! The calculator state machine.
//!
//! [`Calculator::apply`] is a pure reducer over [`CalculatorState`]: it runs
//! one input to completion and reports what happened as a [`StepResult`].
//! Rendering, persistence and the delayed error reset are left to the
//! caller.

use super::entry::Entry;
use super::error::CalcError;
use super::format::{format_operand, format_result};
use super::history::HistoryEntry;
use super::input::Input;
use super::operation::{BinaryOp, MemoryOp, UnaryOp};
use super::state::CalculatorState;

/// Outcome of applying a single input.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    /// Display state changed; nothing to persist
    Updated,

    /// A calculation completed and was added to the history
    Recorded(HistoryEntry),

    /// The history was emptied
    HistoryCleared,

    /// The memory register changed
    MemoryChanged(f64),

    /// A domain error put the calculator into the error display
    Failed(CalcError),

    /// The input had no effect
    Ignored,
}

impl StepResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Accumulator-style calculator: one stored operand, one pending operation,
/// strictly left-to-right evaluation.
///
/// # Example
///
/// ```rust
/// use abacus::core::{BinaryOp, Calculator, Input};
///
/// let mut calc = Calculator::new();
/// for input in [
///     Input::Digit(5),
///     Input::Digit(2),
///     Input::Binary(BinaryOp::Multiply),
///     Input::Digit(3),
///     Input::Execute,
/// ] {
///     calc.apply(input);
/// }
///
/// assert_eq!(calc.state().active_value.as_str(), "156");
/// assert_eq!(calc.state().expression, "52 × 3 = 156");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    state: CalculatorState,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously built state.
    pub fn with_state(state: CalculatorState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Apply one input.
    ///
    /// Input arriving while the error display is showing first clears it, as
    /// if the delayed reset had already fired.
    pub fn apply(&mut self, input: Input) -> StepResult {
        self.expire_error();

        match input {
            Input::Digit(digit) if digit > 9 => StepResult::Ignored,
            Input::Digit(digit) => self.enter_digit(digit),
            Input::Decimal => self.enter_decimal(),
            Input::Binary(op) => self.set_binary(op),
            Input::Unary(op) => self.apply_unary(op),
            Input::Execute => self.execute(),
            Input::Reset => {
                self.state.reset();
                StepResult::Updated
            }
            Input::Memory(op) => self.apply_memory(op),
            Input::SelectHistory(index) => self.select_history(index),
            Input::ClearHistory => {
                self.state.history.clear();
                StepResult::HistoryCleared
            }
        }
    }

    /// Clear the error display, keeping memory and history.
    ///
    /// Returns `false` when no error was showing, so a late reset cannot
    /// clobber newer input.
    pub fn expire_error(&mut self) -> bool {
        if !self.state.is_error() {
            return false;
        }
        self.state.reset();
        true
    }

    fn enter_digit(&mut self, digit: u8) -> StepResult {
        if self.state.awaiting_new_value {
            self.state.active_value = Entry::digit(digit);
            self.state.awaiting_new_value = false;
            return StepResult::Updated;
        }

        if self.state.active_value.push_digit(digit) {
            StepResult::Updated
        } else {
            StepResult::Ignored
        }
    }

    fn enter_decimal(&mut self) -> StepResult {
        if self.state.awaiting_new_value {
            self.state.active_value = Entry::fraction();
            self.state.awaiting_new_value = false;
            return StepResult::Updated;
        }

        if self.state.active_value.push_decimal() {
            StepResult::Updated
        } else {
            StepResult::Ignored
        }
    }

    fn apply_unary(&mut self, op: UnaryOp) -> StepResult {
        let operand = self.state.active_value.value();
        let result = match op.apply(operand) {
            Ok(result) => result,
            Err(error) => return self.fail(error),
        };

        let formatted = format_result(result);
        let expression = op.trace(&format_operand(operand), &formatted);
        self.complete(expression, formatted)
    }

    fn set_binary(&mut self, op: BinaryOp) -> StepResult {
        let current = self.state.active_value.value();

        match (self.state.stored_value, self.state.pending_operation) {
            (None, _) => self.state.stored_value = Some(current),
            (Some(stored), Some(pending)) if !self.state.awaiting_new_value => {
                match pending.apply(stored, current) {
                    Ok(result) => {
                        self.state.active_value = Entry::from_formatted(format_result(result));
                        self.state.stored_value = Some(result);
                    }
                    Err(error) => return self.fail(error),
                }
            }
            _ => {}
        }

        let stored = self.state.stored_value.unwrap_or(current);
        self.state.pending_operation = Some(op);
        self.state.awaiting_new_value = true;
        self.state.expression = format!("{} {}", format_operand(stored), op.symbol());
        StepResult::Updated
    }

    fn execute(&mut self) -> StepResult {
        let (Some(stored), Some(op)) = (self.state.stored_value, self.state.pending_operation)
        else {
            return StepResult::Ignored;
        };

        let result = match op.apply(stored, self.state.active_value.value()) {
            Ok(result) => result,
            // stored operand and pending operation stay until the reset
            Err(error) => return self.fail(error),
        };

        let formatted = format_result(result);
        let expression = format!(
            "{} {} {} = {}",
            format_operand(stored),
            op.symbol(),
            self.state.active_value,
            formatted
        );
        self.state.stored_value = None;
        self.state.pending_operation = None;
        self.complete(expression, formatted)
    }

    fn apply_memory(&mut self, op: MemoryOp) -> StepResult {
        let value = self.state.active_value.value();
        self.state.awaiting_new_value = true;

        match op {
            MemoryOp::Recall => {
                self.state.active_value = Entry::from_formatted(format_result(self.state.memory));
                return StepResult::Updated;
            }
            MemoryOp::Store => self.state.memory = value,
            MemoryOp::Add => self.state.memory += value,
            MemoryOp::Subtract => self.state.memory -= value,
        }
        StepResult::MemoryChanged(self.state.memory)
    }

    fn select_history(&mut self, index: usize) -> StepResult {
        let Some(entry) = self.state.history.get(index) else {
            return StepResult::Ignored;
        };
        if entry.value().is_none() {
            return StepResult::Ignored;
        }

        self.state.active_value = Entry::from_formatted(entry.result.clone());
        self.state.awaiting_new_value = true;
        StepResult::Updated
    }

    /// Show a finished calculation and record it.
    fn complete(&mut self, expression: String, formatted: String) -> StepResult {
        let entry = HistoryEntry::new(expression, formatted);
        self.state.active_value = Entry::from_formatted(entry.result.clone());
        self.state.expression = entry.expression.clone();
        self.state.awaiting_new_value = true;
        self.state.history.record(entry.clone());
        StepResult::Recorded(entry)
    }

    fn fail(&mut self, error: CalcError) -> StepResult {
        self.state.active_value = Entry::error();
        self.state.expression = error.to_string();
        StepResult::Failed(error)
    }
}
