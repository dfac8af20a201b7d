//! Persistence error types.

use thiserror::Error;

/// Errors that can occur while loading or saving persisted records
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing store could not be read or written
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Encoding a record to JSON failed
    #[error("Serialization of '{key}' failed: {source}")]
    SerializationFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record is not valid JSON for its type
    #[error("Deserialization of '{key}' failed: {source}")]
    DeserializationFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
