//! Persisted calculator records.
//!
//! Three independent JSON records live in a [`KeyValueStore`]:
//!
//! - `calculatorHistory`: `[{"expression": .., "result": ..}, ..]`, most recent first
//! - `calculatorSettings`: `{"theme": "light" | "dark"}`
//! - `calculatorMemory`: `{"value": .., "updatedAt": ..}`
//!
//! Each record is loaded once at startup and rewritten in full whenever it
//! changes.

use crate::core::{CalculationHistory, HistoryEntry};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub mod error;
mod store;

pub use error::PersistenceError;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Key of the history record
pub const HISTORY_KEY: &str = "calculatorHistory";

/// Key of the settings record
pub const SETTINGS_KEY: &str = "calculatorSettings";

/// Key of the memory register record
pub const MEMORY_KEY: &str = "calculatorMemory";

/// Colour theme of the display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// User preferences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
}

/// Memory register as stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    pub value: f64,
    pub updated_at: DateTime<Utc>,
}

/// Everything restored at startup.
#[derive(Clone, Debug, Default)]
pub struct SavedSession {
    pub history: CalculationHistory,
    pub settings: Settings,
    pub memory: f64,
}

impl SavedSession {
    /// Load every record, falling back to defaults for records that are
    /// missing or unreadable.
    ///
    /// A corrupt record never prevents the calculator from starting; it is
    /// logged and replaced by its default.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let history = load_history(store).unwrap_or_else(|e| {
            warn!("Discarding stored history: {}", e);
            CalculationHistory::new()
        });
        let settings = load_settings(store).unwrap_or_else(|e| {
            warn!("Discarding stored settings: {}", e);
            Settings::default()
        });
        let memory = load_memory(store).unwrap_or_else(|e| {
            warn!("Discarding stored memory: {}", e);
            0.0
        });

        Self {
            history,
            settings,
            memory,
        }
    }
}

/// Load the history record.
///
/// Entries whose result is not a number are dropped.
pub fn load_history(store: &dyn KeyValueStore) -> Result<CalculationHistory, PersistenceError> {
    let Some(entries) = read_json::<Vec<HistoryEntry>>(store, HISTORY_KEY)? else {
        return Ok(CalculationHistory::new());
    };

    let total = entries.len();
    let valid: Vec<_> = entries
        .into_iter()
        .filter(|entry| entry.value().is_some())
        .collect();
    if valid.len() < total {
        warn!(
            "Dropped {} stored history entries with non-numeric results",
            total - valid.len()
        );
    }

    Ok(CalculationHistory::from_entries(valid))
}

/// Rewrite the history record.
pub fn save_history(
    store: &mut dyn KeyValueStore,
    history: &CalculationHistory,
) -> Result<(), PersistenceError> {
    write_json(store, HISTORY_KEY, history)
}

/// Load the settings record.
pub fn load_settings(store: &dyn KeyValueStore) -> Result<Settings, PersistenceError> {
    Ok(read_json(store, SETTINGS_KEY)?.unwrap_or_default())
}

/// Rewrite the settings record.
pub fn save_settings(
    store: &mut dyn KeyValueStore,
    settings: &Settings,
) -> Result<(), PersistenceError> {
    write_json(store, SETTINGS_KEY, settings)
}

/// Load the memory register; a missing record reads as zero.
pub fn load_memory(store: &dyn KeyValueStore) -> Result<f64, PersistenceError> {
    let record = read_json::<MemoryRecord>(store, MEMORY_KEY)?;
    Ok(record.map_or(0.0, |record| record.value))
}

/// Rewrite the memory register record, stamped with the current time.
///
/// JSON has no infinity or NaN, so a non-finite register is stored as zero.
pub fn save_memory(store: &mut dyn KeyValueStore, value: f64) -> Result<(), PersistenceError> {
    let record = MemoryRecord {
        value: if value.is_finite() { value } else { 0.0 },
        updated_at: Utc::now(),
    };
    write_json(store, MEMORY_KEY, &record)
}

fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| PersistenceError::DeserializationFailed {
            key: key.to_string(),
            source,
        })
}

fn write_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(value).map_err(|source| {
        PersistenceError::SerializationFailed {
            key: key.to_string(),
            source,
        }
    })?;
    store.set(key, &json)
}
