//! Basic Calculator
//!
//! This example walks the pure calculator core through a few inputs.
//!
//! Key concepts:
//! - The calculator is a reducer: one input in, one step result out
//! - Operations chain strictly left to right, with no precedence
//! - Unary operations and completed calculations land in history
//! - Errors show "Error" until the session expires them
//!
//! Run with: cargo run --example basic_calculator

use abacus::core::{BinaryOp, Calculator, Input, MemoryOp, StepResult, UnaryOp};

fn press(calc: &mut Calculator, inputs: &[Input]) -> StepResult {
    let mut last = StepResult::Ignored;
    for input in inputs {
        last = calc.apply(*input);
    }
    last
}

fn show(calc: &Calculator) {
    let state = calc.state();
    println!("  display:    {}", state.active_value);
    println!("  expression: {}", state.expression);
}

fn main() {
    println!("=== Basic Calculator Example ===\n");

    let mut calc = Calculator::new();

    // 2 + 3 × 4 evaluates as (2 + 3) × 4
    println!("2 + 3 × 4 =");
    let result = press(
        &mut calc,
        &[
            Input::Digit(2),
            Input::Binary(BinaryOp::Add),
            Input::Digit(3),
            Input::Binary(BinaryOp::Multiply),
            Input::Digit(4),
            Input::Execute,
        ],
    );
    show(&calc);
    println!("  step:       {:?}\n", result);

    // Keep the result in memory, then square a fresh number
    println!("M+ then 9²");
    press(
        &mut calc,
        &[
            Input::Memory(MemoryOp::Store),
            Input::Digit(9),
            Input::Unary(UnaryOp::Square),
        ],
    );
    show(&calc);
    println!("  memory:     {}\n", calc.state().memory);

    // Division by zero fails without losing memory or history
    println!("1 ÷ 0 =");
    let result = press(
        &mut calc,
        &[
            Input::Digit(1),
            Input::Binary(BinaryOp::Divide),
            Input::Digit(0),
            Input::Execute,
        ],
    );
    show(&calc);
    println!("  failed:     {}", result.is_failure());

    calc.expire_error();
    println!("\nAfter the error expires");
    show(&calc);

    println!("\nHistory, most recent first:");
    for entry in calc.state().history.iter() {
        println!("  {}", entry.expression);
    }

    println!("\n=== Example Complete ===");
}
