//! Keyboard and button bindings.
//!
//! Maps keyboard keys and button action names to session [`Command`]s.
//! Anything unrecognised maps to `None` and is ignored by callers.

use crate::core::{BinaryOp, Input, MemoryOp, UnaryOp};
use crate::session::Command;

/// Prefix of the history selection action, followed by the entry index
pub const HISTORY_SELECT_PREFIX: &str = "history-select:";

/// Command bound to a keyboard key.
///
/// `key` is either a single character or a named key (`Enter`, `Escape`).
///
/// # Example
///
/// ```rust
/// use abacus::core::{BinaryOp, Input};
/// use abacus::keymap::from_key;
/// use abacus::session::Command;
///
/// assert_eq!(from_key("*"), Some(Command::Input(Input::Binary(BinaryOp::Multiply))));
/// assert_eq!(from_key("h"), Some(Command::ToggleHistory));
/// assert_eq!(from_key("x"), None);
/// ```
pub fn from_key(key: &str) -> Option<Command> {
    let input = match key {
        "Enter" | "=" => Input::Execute,
        "Escape" | "c" | "C" => Input::Reset,
        "h" | "H" => return Some(Command::ToggleHistory),
        "." => Input::Decimal,
        "+" => Input::Binary(BinaryOp::Add),
        "-" => Input::Binary(BinaryOp::Subtract),
        "*" => Input::Binary(BinaryOp::Multiply),
        "/" => Input::Binary(BinaryOp::Divide),
        "%" => Input::Unary(UnaryOp::Percent),
        _ => {
            let mut chars = key.chars();
            let digit = match (chars.next(), chars.next()) {
                (Some(c), None) => c.to_digit(10)?,
                _ => return None,
            };
            Input::Digit(digit as u8)
        }
    };
    Some(Command::Input(input))
}

/// Command bound to a button action name.
pub fn from_action(action: &str) -> Option<Command> {
    let input = match action {
        "decimal" => Input::Decimal,
        "reset" => Input::Reset,
        "execute" => Input::Execute,
        "root" => Input::Unary(UnaryOp::Root),
        "percent" => Input::Unary(UnaryOp::Percent),
        "square" => Input::Unary(UnaryOp::Square),
        "reciprocal" => Input::Unary(UnaryOp::Reciprocal),
        "negate" => Input::Unary(UnaryOp::Negate),
        "add" => Input::Binary(BinaryOp::Add),
        "subtract" => Input::Binary(BinaryOp::Subtract),
        "multiply" => Input::Binary(BinaryOp::Multiply),
        "divide" => Input::Binary(BinaryOp::Divide),
        "storage-retrieve" => Input::Memory(MemoryOp::Recall),
        "storage-save" => Input::Memory(MemoryOp::Store),
        "storage-increase" => Input::Memory(MemoryOp::Add),
        "storage-decrease" => Input::Memory(MemoryOp::Subtract),
        "history-clear" => Input::ClearHistory,
        "history" => return Some(Command::ToggleHistory),
        "theme" => return Some(Command::ToggleTheme),
        _ => {
            let index = action.strip_prefix(HISTORY_SELECT_PREFIX)?.parse().ok()?;
            Input::SelectHistory(index)
        }
    };
    Some(Command::Input(input))
}

/// Commands parsed from one line of typed input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedLine {
    pub commands: Vec<Command>,
    /// Tokens that matched no binding
    pub unknown: Vec<String>,
}

/// Parse a line of whitespace-separated tokens.
///
/// Each token is tried as an action name, then as a named or single key,
/// then as a run of single-character keys. A run with any unbound
/// character is rejected as a whole.
///
/// # Example
///
/// ```rust
/// use abacus::keymap::parse_line;
///
/// let parsed = parse_line("52*3 Enter square bogus");
/// assert_eq!(parsed.commands.len(), 6);
/// assert_eq!(parsed.unknown, vec!["bogus".to_string()]);
/// ```
pub fn parse_line(line: &str) -> ParsedLine {
    let mut parsed = ParsedLine::default();

    for token in line.split_whitespace() {
        if let Some(command) = from_action(token).or_else(|| from_key(token)) {
            parsed.commands.push(command);
            continue;
        }

        let run: Option<Vec<Command>> = token
            .chars()
            .map(|c| from_key(c.encode_utf8(&mut [0; 4])))
            .collect();
        match run {
            Some(commands) => parsed.commands.extend(commands),
            None => parsed.unknown.push(token.to_string()),
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(command: Option<Command>) -> Option<Input> {
        match command {
            Some(Command::Input(input)) => Some(input),
            _ => None,
        }
    }

    #[test]
    fn digit_keys() {
        for d in 0..=9u8 {
            let key = d.to_string();
            assert_eq!(input(from_key(&key)), Some(Input::Digit(d)));
        }
    }

    #[test]
    fn documented_keys() {
        assert_eq!(input(from_key(".")), Some(Input::Decimal));
        assert_eq!(input(from_key("+")), Some(Input::Binary(BinaryOp::Add)));
        assert_eq!(input(from_key("-")), Some(Input::Binary(BinaryOp::Subtract)));
        assert_eq!(input(from_key("*")), Some(Input::Binary(BinaryOp::Multiply)));
        assert_eq!(input(from_key("/")), Some(Input::Binary(BinaryOp::Divide)));
        assert_eq!(input(from_key("Enter")), Some(Input::Execute));
        assert_eq!(input(from_key("=")), Some(Input::Execute));
        for key in ["Escape", "c", "C"] {
            assert_eq!(input(from_key(key)), Some(Input::Reset));
        }
        assert_eq!(input(from_key("%")), Some(Input::Unary(UnaryOp::Percent)));
        assert_eq!(from_key("h"), Some(Command::ToggleHistory));
        assert_eq!(from_key("H"), Some(Command::ToggleHistory));
    }

    #[test]
    fn unbound_keys_are_none() {
        assert_eq!(from_key("x"), None);
        assert_eq!(from_key("12"), None);
        assert_eq!(from_key("٣"), None);
        assert_eq!(from_key(""), None);
    }

    #[test]
    fn actions() {
        assert_eq!(input(from_action("root")), Some(Input::Unary(UnaryOp::Root)));
        assert_eq!(
            input(from_action("storage-decrease")),
            Some(Input::Memory(MemoryOp::Subtract))
        );
        assert_eq!(input(from_action("history-select:3")), Some(Input::SelectHistory(3)));
        assert_eq!(from_action("history-select:x"), None);
        assert_eq!(from_action("theme"), Some(Command::ToggleTheme));
        assert_eq!(from_action("explode"), None);
    }

    #[test]
    fn line_mixes_runs_and_actions() {
        let parsed = parse_line("12.5 storage-save c");
        assert_eq!(
            parsed.commands,
            vec![
                Command::Input(Input::Digit(1)),
                Command::Input(Input::Digit(2)),
                Command::Input(Input::Decimal),
                Command::Input(Input::Digit(5)),
                Command::Input(Input::Memory(MemoryOp::Store)),
                Command::Input(Input::Reset),
            ]
        );
        assert!(parsed.unknown.is_empty());
    }

    #[test]
    fn run_with_unbound_character_is_rejected() {
        let parsed = parse_line("1+x");
        assert!(parsed.commands.is_empty());
        assert_eq!(parsed.unknown, vec!["1+x".to_string()]);
    }
}
