//! Error types for the rota engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rota data and
//! computing leave reports.

use thiserror::Error;

/// The main error type for the rota engine.
///
/// Leave calculations themselves never fail; errors come from parsing
/// source text and from loading the data directory.
///
/// # Example
///
/// ```
/// use rota_engine::error::EngineError;
///
/// let error = EngineError::DataNotFound {
///     path: "/missing/rota.json".to_string(),
/// };
/// assert_eq!(error.to_string(), "Data file not found: /missing/rota.json");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A date string could not be parsed in the expected format.
    #[error("Invalid date '{input}': {message}")]
    DateParse {
        /// The text that failed to parse.
        input: String,
        /// A description of what was wrong with it.
        message: String,
    },

    /// A data or settings file was not found at the specified path.
    #[error("Data file not found: {path}")]
    DataNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A data or settings file could not be parsed.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rota entry was structurally valid JSON but not a usable rota row.
    #[error("Invalid rota entry {index}: {message}")]
    InvalidRotaEntry {
        /// Position of the entry in the rota file.
        index: usize,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// No registrar with the given name exists in the loaded data.
    #[error("Registrar not found: {name}")]
    RegistrarNotFound {
        /// The registrar name that was requested.
        name: String,
    },

    /// No block timetable with the given name exists in the loaded data.
    #[error("Block not found: {name}")]
    BlockNotFound {
        /// The block name that was requested.
        name: String,
    },
}

impl EngineError {
    pub(crate) fn date_parse(input: &str, message: impl Into<String>) -> Self {
        EngineError::DateParse {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
