//! Operation tables for unary and binary calculator operations.
//!
//! Every operation is a tagged variant, so dispatch is an exhaustive `match`
//! instead of a lookup that can silently miss.

use super::error::CalcError;
use serde::{Deserialize, Serialize};

/// Binary operations that take the stored operand and the active value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// Apply the operation to `(a, b)`.
    ///
    /// Division by zero is reported as an error value, not a panic or an
    /// infinity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus::core::{BinaryOp, CalcError};
    ///
    /// assert_eq!(BinaryOp::Multiply.apply(52.0, 3.0), Ok(156.0));
    /// assert_eq!(BinaryOp::Divide.apply(1.0, 0.0), Err(CalcError::DivisionByZero));
    /// ```
    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalcError> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide if b == 0.0 => Err(CalcError::DivisionByZero),
            Self::Divide => Ok(a / b),
        }
    }

    /// Symbol shown in expression traces.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Action name used by buttons and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

/// Single-operand operations applied to the active value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryOp {
    Root,
    Percent,
    Square,
    Reciprocal,
    Negate,
}

impl UnaryOp {
    /// Apply the operation to `x`, checking its domain first.
    pub fn apply(self, x: f64) -> Result<f64, CalcError> {
        match self {
            Self::Root if x < 0.0 => Err(CalcError::NegativeRoot),
            Self::Root => Ok(x.sqrt()),
            Self::Percent => Ok(x / 100.0),
            Self::Square => Ok(x * x),
            Self::Reciprocal if x == 0.0 => Err(CalcError::DivisionByZero),
            Self::Reciprocal => Ok(1.0 / x),
            Self::Negate => Ok(-x),
        }
    }

    /// Human-readable trace for `operand` producing `result`.
    ///
    /// `operand` and `result` are already formatted for display.
    pub fn trace(self, operand: &str, result: &str) -> String {
        match self {
            Self::Square => format!("{operand}² = {result}"),
            Self::Reciprocal => format!("1/{operand} = {result}"),
            Self::Negate => format!("-({operand}) = {result}"),
            Self::Root => format!("√({operand}) = {result}"),
            Self::Percent => format!("%({operand}) = {result}"),
        }
    }

    /// Action name used by buttons and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Percent => "percent",
            Self::Square => "square",
            Self::Reciprocal => "reciprocal",
            Self::Negate => "negate",
        }
    }
}

/// Operations on the memory register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryOp {
    Recall,
    Store,
    Add,
    Subtract,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_table() {
        assert_eq!(BinaryOp::Add.apply(2.0, 3.0), Ok(5.0));
        assert_eq!(BinaryOp::Subtract.apply(2.0, 3.0), Ok(-1.0));
        assert_eq!(BinaryOp::Multiply.apply(2.0, 3.0), Ok(6.0));
        assert_eq!(BinaryOp::Divide.apply(3.0, 2.0), Ok(1.5));
    }

    #[test]
    fn divide_by_zero_is_an_error_value() {
        assert_eq!(BinaryOp::Divide.apply(5.0, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(BinaryOp::Divide.apply(0.0, -0.0), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn unary_domains() {
        assert_eq!(UnaryOp::Root.apply(-1.0), Err(CalcError::NegativeRoot));
        assert_eq!(UnaryOp::Reciprocal.apply(0.0), Err(CalcError::DivisionByZero));
        assert_eq!(UnaryOp::Root.apply(16.0), Ok(4.0));
        assert_eq!(UnaryOp::Reciprocal.apply(4.0), Ok(0.25));
        assert_eq!(UnaryOp::Percent.apply(50.0), Ok(0.5));
        assert_eq!(UnaryOp::Square.apply(-3.0), Ok(9.0));
        assert_eq!(UnaryOp::Negate.apply(4.0), Ok(-4.0));
    }

    #[test]
    fn traces_per_operation() {
        assert_eq!(UnaryOp::Square.trace("4", "16"), "4² = 16");
        assert_eq!(UnaryOp::Reciprocal.trace("4", "0.25"), "1/4 = 0.25");
        assert_eq!(UnaryOp::Negate.trace("4", "-4"), "-(4) = -4");
        assert_eq!(UnaryOp::Root.trace("4", "2"), "√(4) = 2");
        assert_eq!(UnaryOp::Percent.trace("50", "0.5"), "%(50) = 0.5");
    }

    #[test]
    fn symbols() {
        assert_eq!(BinaryOp::Add.symbol(), "+");
        assert_eq!(BinaryOp::Subtract.symbol(), "−");
        assert_eq!(BinaryOp::Multiply.symbol(), "×");
        assert_eq!(BinaryOp::Divide.symbol(), "÷");
    }
}
