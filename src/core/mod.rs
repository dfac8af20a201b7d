//! Core calculator types and logic.
//!
//! This module contains the pure core of the calculator:
//! - The editable display entry and number formatting
//! - Operation tables as tagged enums
//! - The accumulator state machine and its bounded history
//!
//! Nothing in here performs I/O or keeps time; the session shell drives it.

mod calculator;
mod entry;
mod error;
mod format;
mod history;
mod input;
mod operation;
mod state;

pub use calculator::{Calculator, StepResult};
pub use entry::{parse_number, Entry, ERROR_TEXT, MAX_ENTRY_LEN};
pub use error::CalcError;
pub use format::{format_operand, format_result};
pub use history::{CalculationHistory, HistoryEntry, HISTORY_CAPACITY};
pub use input::Input;
pub use operation::{BinaryOp, MemoryOp, UnaryOp};
pub use state::CalculatorState;
