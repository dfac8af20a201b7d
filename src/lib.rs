//! Abacus: an accumulator-style pocket calculator
//!
//! Abacus follows a "pure core, imperative shell" split. The core state
//! machine is a plain reducer over an explicit state record with no I/O or
//! timers, while rendering, persistence and the delayed error reset live in
//! the session shell around it.
//!
//! # Core Concepts
//!
//! - **Calculator**: one stored operand, one pending operation, strictly
//!   left-to-right evaluation, no precedence
//! - **Session**: owns the calculator, a screen and a key-value store
//! - **Keymap**: keyboard keys and button actions to commands
//!
//! # Example
//!
//! ```rust
//! use abacus::core::{BinaryOp, Calculator, Input, StepResult};
//!
//! let mut calc = Calculator::new();
//! calc.apply(Input::Digit(2));
//! calc.apply(Input::Binary(BinaryOp::Add));
//! calc.apply(Input::Digit(3));
//! calc.apply(Input::Binary(BinaryOp::Add));
//! calc.apply(Input::Digit(4));
//!
//! match calc.apply(Input::Execute) {
//!     StepResult::Recorded(entry) => assert_eq!(entry.result, "9"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod core;
pub mod keymap;
pub mod persistence;
pub mod session;
pub mod terminal;

// Re-export commonly used types
pub use self::core::{Calculator, CalculatorState, Input, StepResult};
pub use session::{Command, Session, SessionConfig, SessionHandle};
