//! The imperative shell around the calculator.
//!
//! A [`Session`] owns the [`Calculator`] together with its collaborators: a
//! [`Screen`] to render to and a [`KeyValueStore`] to persist into. It turns
//! every [`StepResult`] into screen updates and record writes.
//!
//! [`SessionHandle`] runs a session on its own tokio task and drives the
//! delayed reset after an error.

mod screen;
mod task;

pub use screen::{RecordingScreen, Screen, ScreenEvent};
pub use task::{SessionConfig, SessionError, SessionHandle};

use crate::core::{format_result, CalculatorState, Calculator, Input, StepResult};
use crate::persistence::{self, KeyValueStore, SavedSession, Settings, Theme};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Session-level command: a calculator input or a view toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Input(Input),
    ToggleHistory,
    ToggleTheme,
}

impl From<Input> for Command {
    fn from(input: Input) -> Self {
        Self::Input(input)
    }
}

/// What the user currently sees.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub value: String,
    pub expression: String,
    /// Formatted memory register when non-zero
    pub memory: Option<String>,
    pub error: bool,
    pub theme: Theme,
    pub history_visible: bool,
    pub history_len: usize,
}

/// Calculator plus its screen and storage.
pub struct Session<S: KeyValueStore, D: Screen> {
    calculator: Calculator,
    settings: Settings,
    history_visible: bool,
    store: S,
    screen: D,
}

impl<S: KeyValueStore, D: Screen> Session<S, D> {
    /// Restore saved history, memory and settings from `store` and draw the
    /// initial screen.
    pub fn open(store: S, screen: D) -> Self {
        let saved = SavedSession::load(&store);
        info!(
            "Restored {} history entries, theme {:?}",
            saved.history.len(),
            saved.settings.theme
        );

        let state = CalculatorState::with_saved(saved.memory, saved.history);
        let mut session = Self {
            calculator: Calculator::with_state(state),
            settings: saved.settings,
            history_visible: false,
            store,
            screen,
        };

        session.screen.apply_theme(session.settings.theme);
        session.screen.show_history_panel(false);
        session.render_history();
        session.render_display();
        session.screen.flush();
        session
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_error(&self) -> bool {
        self.calculator.state().is_error()
    }

    /// Apply one command without flushing the screen.
    ///
    /// Any command clears an error display that is still showing before it
    /// runs.
    pub fn dispatch(&mut self, command: Command) -> StepResult {
        self.clear_error();

        match command {
            Command::ToggleHistory => {
                self.history_visible = !self.history_visible;
                self.screen.show_history_panel(self.history_visible);
                StepResult::Updated
            }
            Command::ToggleTheme => {
                self.settings.theme = self.settings.theme.toggled();
                self.screen.apply_theme(self.settings.theme);
                if let Err(e) = persistence::save_settings(&mut self.store, &self.settings) {
                    warn!("Failed to save settings: {}", e);
                }
                StepResult::Updated
            }
            Command::Input(input) => self.apply_input(input),
        }
    }

    /// Apply a batch of commands and flush the screen once.
    pub fn dispatch_all(&mut self, commands: &[Command]) -> Vec<StepResult> {
        let results = commands.iter().map(|c| self.dispatch(*c)).collect();
        self.screen.flush();
        results
    }

    /// Delayed reset after an error.
    ///
    /// Returns `false` without touching anything when the error display has
    /// already been cleared.
    pub fn expire_error(&mut self) -> bool {
        if !self.clear_error() {
            return false;
        }
        self.screen.flush();
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.calculator.state();
        Snapshot {
            value: state.active_value.to_string(),
            expression: state.expression.clone(),
            memory: state.memory_active().then(|| format_result(state.memory)),
            error: state.is_error(),
            theme: self.settings.theme,
            history_visible: self.history_visible,
            history_len: state.history.len(),
        }
    }

    fn apply_input(&mut self, input: Input) -> StepResult {
        let result = self.calculator.apply(input);
        debug!(input = input.name(), result = ?result, "Applied input");

        match &result {
            StepResult::Recorded(_) | StepResult::HistoryCleared => {
                let history = &self.calculator.state().history;
                if let Err(e) = persistence::save_history(&mut self.store, history) {
                    warn!("Failed to save history: {}", e);
                }
                self.render_history();
            }
            StepResult::MemoryChanged(value) => {
                if let Err(e) = persistence::save_memory(&mut self.store, *value) {
                    warn!("Failed to save memory: {}", e);
                }
            }
            StepResult::Failed(error) => {
                info!("Calculation failed: {}", error);
                self.screen.show_error(true);
            }
            StepResult::Updated | StepResult::Ignored => {}
        }

        if result != StepResult::Ignored {
            self.render_display();
        }
        result
    }

    fn clear_error(&mut self) -> bool {
        if !self.calculator.expire_error() {
            return false;
        }
        self.screen.show_error(false);
        self.render_display();
        true
    }

    fn render_display(&mut self) {
        let state = self.calculator.state();
        self.screen.show_value(state.active_value.as_str());
        self.screen.show_expression(&state.expression);
        let memory = state.memory_active().then(|| format_result(state.memory));
        self.screen.show_memory(memory.as_deref());
    }

    fn render_history(&mut self) {
        let entries = self.calculator.state().history.to_vec();
        self.screen.render_history(&entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BinaryOp, HistoryEntry, MemoryOp, UnaryOp};
    use crate::persistence::{MemoryStore, HISTORY_KEY, MEMORY_KEY, SETTINGS_KEY};

    fn open() -> (Session<MemoryStore, RecordingScreen>, MemoryStore, RecordingScreen) {
        let store = MemoryStore::new();
        let screen = RecordingScreen::new();
        let session = Session::open(store.clone(), screen.clone());
        (session, store, screen)
    }

    fn inputs(session: &mut Session<MemoryStore, RecordingScreen>, inputs: &[Input]) {
        let commands: Vec<Command> = inputs.iter().copied().map(Command::from).collect();
        session.dispatch_all(&commands);
    }

    #[test]
    fn open_draws_initial_screen() {
        let (_session, _store, screen) = open();
        let events = screen.events();

        assert!(events.contains(&ScreenEvent::Theme(Theme::Dark)));
        assert!(events.contains(&ScreenEvent::History(Vec::new())));
        assert!(events.contains(&ScreenEvent::Memory(None)));
        assert_eq!(screen.last_value().as_deref(), Some("0"));
        assert_eq!(events.last(), Some(&ScreenEvent::Flush));
    }

    #[test]
    fn open_restores_saved_records() {
        let mut store = MemoryStore::new();
        store
            .set(HISTORY_KEY, r#"[{"expression":"2 + 2 = 4","result":"4"}]"#)
            .unwrap();
        store.set(SETTINGS_KEY, r#"{"theme":"light"}"#).unwrap();
        persistence::save_memory(&mut store, 3.5).unwrap();

        let session = Session::open(store, RecordingScreen::new());
        let snapshot = session.snapshot();

        assert_eq!(snapshot.history_len, 1);
        assert_eq!(snapshot.theme, Theme::Light);
        assert_eq!(snapshot.memory.as_deref(), Some("3.5"));
    }

    #[test]
    fn recorded_calculation_is_persisted_and_rendered() {
        let (mut session, store, screen) = open();
        inputs(
            &mut session,
            &[Input::Digit(3), Input::Unary(UnaryOp::Square)],
        );

        assert_eq!(
            store.get(HISTORY_KEY).unwrap().as_deref(),
            Some(r#"[{"expression":"3² = 9","result":"9"}]"#)
        );
        assert!(screen
            .events()
            .contains(&ScreenEvent::History(vec![HistoryEntry::new("3² = 9", "9")])));
        assert_eq!(screen.last_value().as_deref(), Some("9"));
    }

    #[test]
    fn clear_history_is_persisted() {
        let (mut session, store, _screen) = open();
        inputs(
            &mut session,
            &[Input::Digit(3), Input::Unary(UnaryOp::Square), Input::ClearHistory],
        );
        assert_eq!(store.get(HISTORY_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn memory_changes_are_persisted() {
        let (mut session, store, _screen) = open();
        inputs(
            &mut session,
            &[Input::Digit(8), Input::Memory(MemoryOp::Store)],
        );

        assert_eq!(persistence::load_memory(&store).unwrap(), 8.0);
        assert!(store.get(MEMORY_KEY).unwrap().is_some());
        assert_eq!(session.snapshot().memory.as_deref(), Some("8"));
    }

    #[test]
    fn theme_toggle_is_persisted() {
        let (mut session, store, screen) = open();
        session.dispatch_all(&[Command::ToggleTheme]);

        assert_eq!(
            store.get(SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"theme":"light"}"#)
        );
        assert!(screen.events().contains(&ScreenEvent::Theme(Theme::Light)));
    }

    #[test]
    fn history_panel_toggles() {
        let (mut session, store, _screen) = open();
        session.dispatch_all(&[Command::ToggleHistory]);
        assert!(session.snapshot().history_visible);
        session.dispatch_all(&[Command::ToggleHistory]);
        assert!(!session.snapshot().history_visible);
        assert_eq!(store.get(SETTINGS_KEY).unwrap(), None);
    }

    #[test]
    fn error_flashes_and_expires() {
        let (mut session, _store, screen) = open();
        inputs(
            &mut session,
            &[
                Input::Digit(1),
                Input::Binary(BinaryOp::Divide),
                Input::Digit(0),
                Input::Execute,
            ],
        );
        assert!(session.is_error());
        assert!(screen.events().contains(&ScreenEvent::Error(true)));
        assert_eq!(session.snapshot().expression, "Cannot divide by zero");

        assert!(session.expire_error());
        assert!(!session.is_error());
        assert_eq!(screen.last_value().as_deref(), Some("0"));
        assert_eq!(screen.events().last(), Some(&ScreenEvent::Flush));
        assert!(!session.expire_error());
    }

    #[test]
    fn toggle_during_error_clears_it() {
        let (mut session, _store, _screen) = open();
        inputs(&mut session, &[Input::Unary(UnaryOp::Reciprocal)]);
        session.dispatch_all(&[Command::ToggleHistory]);

        let snapshot = session.snapshot();
        assert!(!snapshot.error);
        assert_eq!(snapshot.value, "0");
    }
}
