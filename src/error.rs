//! Error types for the HOS compliance engine.
//!
//! Expected validation failures are never errors; they are returned inside a
//! [`ValidationOutcome`](crate::models::ValidationOutcome). The variants here
//! cover malformed input (an integration bug upstream) and ruleset loading.

use thiserror::Error;

/// The main error type for the HOS compliance engine.
///
/// # Example
///
/// ```
/// use hos_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/limits.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/limits.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A timestamp could not be parsed as RFC 3339.
    #[error("Malformed timestamp in '{field}': '{value}' ({message})")]
    MalformedTimestamp {
        /// The field holding the timestamp.
        field: String,
        /// The raw value that failed to parse.
        value: String,
        /// The parser's description of the failure.
        message: String,
    },

    /// The supplied input could not be interpreted at all.
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// A description of what was wrong with the input.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A loaded ruleset contained inconsistent limits.
    #[error("Invalid ruleset field '{field}': {message}")]
    InvalidRuleset {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
