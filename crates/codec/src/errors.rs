//! Error types for the wire codecs.
//!
//! Only the envelope codec can fail. The multi-value parameter codec models
//! "absent" and "empty" as ordinary results and therefore has no error type.
//!
//! None of these errors are retryable: an envelope violation in a response
//! body will be the same on every attempt, so the client layer propagates
//! them unmodified.

use thiserror::Error;

use crate::envelope::WrapSpec;

/// Failure while decoding or encoding an enveloped JSON document.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The wrapper field demanded by the shape's [`WrapSpec`] is not the
    /// first field of the enclosing object, or the document is not an object.
    #[error(
        "JSON for {shape} is not wrapped inside an object with '{}' property",
        .wrap.field_name()
    )]
    MissingWrapper {
        /// Name of the target shape.
        shape: &'static str,
        /// Wrapping the shape requires.
        wrap: WrapSpec,
    },

    /// Another field follows the wrapper field in the enclosing object.
    #[error(
        "JSON for {shape} contains unsupported extra field {field} besides '{}' wrapper property",
        .wrap.field_name()
    )]
    UnexpectedField {
        /// Name of the target shape.
        shape: &'static str,
        /// Wrapping the shape requires.
        wrap: WrapSpec,
        /// The offending sibling field.
        field: String,
    },

    /// The (unwrapped) value could not be decoded into the target shape.
    ///
    /// Produced by the structural decoder, not by the envelope logic. Envelope
    /// violations in nested values (list elements, fields) also surface here
    /// because they are reported through serde.
    #[error("JSON could not be decoded into {shape}: {source}")]
    ShapeMismatch {
        /// Name of the target shape.
        shape: &'static str,
        /// Underlying structural decoding error.
        #[source]
        source: serde_json::Error,
    },

    /// The raw bytes are not a JSON document at all.
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Name of the shape this error refers to, if any.
    pub fn shape(&self) -> Option<&'static str> {
        match self {
            Self::MissingWrapper { shape, .. }
            | Self::UnexpectedField { shape, .. }
            | Self::ShapeMismatch { shape, .. } => Some(shape),
            Self::Json(_) => None,
        }
    }
}
