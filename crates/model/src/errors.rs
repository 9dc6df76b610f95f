//! Error type for parsing model values from their textual wire form.

use thiserror::Error;

/// Failure to interpret a string as one of the model's wire values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The string is not the wire-name of any variant of `kind`.
    #[error("Unknown {kind} value: '{value}'")]
    UnknownValue {
        /// Name of the enumeration that was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// An identifier field holds the empty string.
    #[error("{kind} must not be empty")]
    EmptyIdentifier {
        /// Name of the identifier type.
        kind: &'static str,
    },

    /// A sort specification is not of the form `<field> [ASC|DESC]`.
    #[error("Invalid sort specification '{value}': {reason}")]
    InvalidSort {
        /// The rejected input.
        value: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}
