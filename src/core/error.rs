//! Domain errors raised by calculator operations.

use thiserror::Error;

/// Recoverable, user-visible arithmetic errors.
///
/// These never abort the calculator. They put it into the error display
/// until the session resets it.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CalcError {
    /// Binary division or reciprocal with a zero operand
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Square root of a negative operand
    #[error("Invalid operation: negative square root")]
    NegativeRoot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_display_text() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "Cannot divide by zero");
        assert_eq!(
            CalcError::NegativeRoot.to_string(),
            "Invalid operation: negative square root"
        );
    }
}
