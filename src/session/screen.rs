//! Display collaborator interface.

use crate::core::HistoryEntry;
use crate::persistence::Theme;
use std::sync::{Arc, Mutex, MutexGuard};

/// Where the session sends everything the user should see.
///
/// Calls arrive in batches; [`Screen::flush`] marks the end of a batch.
pub trait Screen: Send {
    /// Main display text.
    fn show_value(&mut self, value: &str);

    /// Expression trace or error message.
    fn show_expression(&mut self, expression: &str);

    /// Memory indicator: `Some(formatted)` when the register is non-zero.
    fn show_memory(&mut self, memory: Option<&str>);

    /// Full history list, most recent first.
    fn render_history(&mut self, entries: &[HistoryEntry]);

    /// Error animation on or off.
    fn show_error(&mut self, active: bool);

    fn apply_theme(&mut self, theme: Theme);

    fn show_history_panel(&mut self, visible: bool);

    /// End of a batch of updates.
    fn flush(&mut self) {}
}

/// A single call received by a [`RecordingScreen`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScreenEvent {
    Value(String),
    Expression(String),
    Memory(Option<String>),
    History(Vec<HistoryEntry>),
    Error(bool),
    Theme(Theme),
    HistoryPanel(bool),
    Flush,
}

/// Screen that records every call, for tests and headless embedding.
///
/// Clones share the same event log.
#[derive(Clone, Debug, Default)]
pub struct RecordingScreen {
    events: Arc<Mutex<Vec<ScreenEvent>>>,
}

impl RecordingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event recorded so far.
    pub fn events(&self) -> Vec<ScreenEvent> {
        self.log().clone()
    }

    /// Most recent value shown on the main display.
    pub fn last_value(&self) -> Option<String> {
        self.log().iter().rev().find_map(|event| match event {
            ScreenEvent::Value(value) => Some(value.clone()),
            _ => None,
        })
    }

    fn log(&self) -> MutexGuard<'_, Vec<ScreenEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, event: ScreenEvent) {
        self.log().push(event);
    }
}

impl Screen for RecordingScreen {
    fn show_value(&mut self, value: &str) {
        self.push(ScreenEvent::Value(value.to_string()));
    }

    fn show_expression(&mut self, expression: &str) {
        self.push(ScreenEvent::Expression(expression.to_string()));
    }

    fn show_memory(&mut self, memory: Option<&str>) {
        self.push(ScreenEvent::Memory(memory.map(str::to_string)));
    }

    fn render_history(&mut self, entries: &[HistoryEntry]) {
        self.push(ScreenEvent::History(entries.to_vec()));
    }

    fn show_error(&mut self, active: bool) {
        self.push(ScreenEvent::Error(active));
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.push(ScreenEvent::Theme(theme));
    }

    fn show_history_panel(&mut self, visible: bool) {
        self.push(ScreenEvent::HistoryPanel(visible));
    }

    fn flush(&mut self) {
        self.push(ScreenEvent::Flush);
    }
}
