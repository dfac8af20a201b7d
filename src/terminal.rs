//! Coloured terminal rendering.

use crate::core::HistoryEntry;
use crate::persistence::Theme;
use crate::session::Screen;
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Screen that prints one frame to stdout per flushed batch.
#[derive(Debug, Default)]
pub struct TerminalScreen {
    value: String,
    expression: String,
    memory: Option<String>,
    history: Vec<HistoryEntry>,
    error: bool,
    theme: Theme,
    history_visible: bool,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the current frame as lines of text.
    pub fn frame(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if self.history_visible {
            if self.history.is_empty() {
                lines.push(self.muted("  (no history)").to_string());
            }
            for (index, entry) in self.history.iter().enumerate() {
                lines.push(format!(
                    "  {} {}",
                    self.muted(&format!("[{index}]")),
                    entry.expression
                ));
            }
        }

        if !self.expression.is_empty() {
            lines.push(format!("  {}", self.muted(&self.expression)));
        }

        let memory = match &self.memory {
            Some(memory) => format!("  {}", self.accent(&format!("M {memory}"))),
            None => String::new(),
        };
        lines.push(format!("  {}{}", self.value_text(), memory));
        lines
    }

    fn value_text(&self) -> ColoredString {
        if self.error {
            return self.value.red().bold();
        }
        match self.theme {
            Theme::Dark => self.value.white().bold(),
            Theme::Light => self.value.black().on_white().bold(),
        }
    }

    fn muted(&self, text: &str) -> ColoredString {
        text.dimmed()
    }

    fn accent(&self, text: &str) -> ColoredString {
        match self.theme {
            Theme::Dark => text.yellow(),
            Theme::Light => text.blue(),
        }
    }
}

impl Screen for TerminalScreen {
    fn show_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn show_expression(&mut self, expression: &str) {
        self.expression = expression.to_string();
    }

    fn show_memory(&mut self, memory: Option<&str>) {
        self.memory = memory.map(str::to_string);
    }

    fn render_history(&mut self, entries: &[HistoryEntry]) {
        self.history = entries.to_vec();
    }

    fn show_error(&mut self, active: bool) {
        self.error = active;
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn show_history_panel(&mut self, visible: bool) {
        self.history_visible = visible;
    }

    fn flush(&mut self) {
        let mut stdout = io::stdout().lock();
        for line in self.frame() {
            // a closed stdout only loses output
            let _ = writeln!(stdout, "{line}");
        }
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_frame(screen: &TerminalScreen) -> Vec<String> {
        colored::control::set_override(false);
        screen.frame()
    }

    #[test]
    fn frame_shows_expression_value_and_memory() {
        let mut screen = TerminalScreen::new();
        screen.show_expression("52 × 3 = 156");
        screen.show_value("156");
        screen.show_memory(Some("7"));

        assert_eq!(
            plain_frame(&screen),
            vec!["  52 × 3 = 156".to_string(), "  156  M 7".to_string()]
        );
    }

    #[test]
    fn history_panel_lists_entries() {
        let mut screen = TerminalScreen::new();
        screen.show_value("0");
        screen.render_history(&[HistoryEntry::new("4² = 16", "16")]);
        screen.show_history_panel(true);

        let frame = plain_frame(&screen);
        assert_eq!(frame[0], "  [0] 4² = 16");
        assert_eq!(frame.last().map(String::as_str), Some("  0"));
    }
}
