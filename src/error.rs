//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rules or
//! computing pay.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::MissingRuleSection {
///     section: "income_tax_slabs".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Rule table is missing required section: income_tax_slabs"
/// );
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

    /// The rule table lacks a section every calculation depends on.
    #[error("Rule table is missing required section: {section}")]
    MissingRuleSection {
        /// Dotted name of the missing section (e.g. `professional_tax.default`).
        section: String,
    },

    /// The rule table is present but internally inconsistent.
    #[error("Invalid rule table: {message}")]
    InvalidRuleTable {
        /// A description of the inconsistency.
        message: String,
    },

    /// An employee record was missing data or carried an impossible value.
    #[error("Invalid record '{employee_id}' field '{field}': {message}")]
    InvalidRecord {
        /// The ID of the offending record (may be empty).
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
