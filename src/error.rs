//! Error types for the tax computation and reconciliation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during tax computation and
//! certificate reconciliation.

use thiserror::Error;

/// The main error type for the engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// Note that a failed reconciliation is deliberately *not* an error: it is
/// the [`MatchOutcome::NoMatch`](crate::matching::MatchOutcome) variant, a
/// normal reportable outcome.
///
/// # Example
///
/// ```
/// use taxcore::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rules.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A supplied rule set failed its structural invariants.
    ///
    /// Raised at configuration-load time, before any computation proceeds,
    /// so a broken bracket table or weight table can never produce silently
    /// wrong figures.
    #[error("Invalid configuration '{rule}': {message}")]
    ConfigurationError {
        /// The rule or table that failed validation.
        rule: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// A monetary input was non-numeric or violated a non-negativity
    /// constraint where one is required.
    #[error("Invalid amount '{value}': {message}")]
    InvalidAmount {
        /// The offending input value.
        value: String,
        /// A description of what made the amount invalid.
        message: String,
    },

    /// A required payroll field was missing or structurally invalid.
    #[error("Invalid payroll input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
