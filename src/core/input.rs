//! Discrete inputs accepted by the calculator.

use super::operation::{BinaryOp, MemoryOp, UnaryOp};
use serde::{Deserialize, Serialize};

/// One calculator input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    /// A digit key, `0..=9`
    Digit(u8),
    Decimal,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Execute,
    Reset,
    Memory(MemoryOp),
    /// Load the result of history entry `n` (0 is the most recent)
    SelectHistory(usize),
    ClearHistory,
}

impl Input {
    /// Digit input, or `None` when `digit` is not a decimal digit.
    pub fn digit(digit: u8) -> Option<Self> {
        (digit <= 9).then_some(Self::Digit(digit))
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Digit(_) => "digit",
            Self::Decimal => "decimal",
            Self::Binary(op) => op.name(),
            Self::Unary(op) => op.name(),
            Self::Execute => "execute",
            Self::Reset => "reset",
            Self::Memory(MemoryOp::Recall) => "storage-retrieve",
            Self::Memory(MemoryOp::Store) => "storage-save",
            Self::Memory(MemoryOp::Add) => "storage-increase",
            Self::Memory(MemoryOp::Subtract) => "storage-decrease",
            Self::SelectHistory(_) => "history-select",
            Self::ClearHistory => "history-clear",
        }
    }
}
