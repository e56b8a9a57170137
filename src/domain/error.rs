//! Domain validation errors.
//!
//! Returned when a value crossing into the domain (from a CLI argument or a
//! stored row) falls outside what a field accepts.
//!
//! # Examples
//!
//! ```
//! use appraisal::domain::choice::QuestionType;
//! use appraisal::domain::error::DomainError;
//!
//! let result = "essay".parse::<QuestionType>();
//! assert!(matches!(result, Err(DomainError::InvalidChoice { field: "question_type", .. })));
//! ```

use thiserror::Error;

/// Errors that occur when a domain field receives an unacceptable value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A choice-constrained field received a value outside its set.
    #[error("invalid value '{value}' for {field}; expected one of: {expected}")]
    InvalidChoice {
        /// Field being assigned.
        field: &'static str,
        /// The rejected input.
        value: String,
        /// Comma-separated accepted values.
        expected: String,
    },

    /// A date field could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date '{value}' for {field}; expected YYYY-MM-DD")]
    InvalidDate {
        /// Field being assigned.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A date outside the years the stores can keep in sortable text form.
    #[error("date {value} for {field} is out of range; years must be 0000 to 9999")]
    DateOutOfRange {
        /// Field being assigned.
        field: &'static str,
        /// The rejected date.
        value: String,
    },
}
