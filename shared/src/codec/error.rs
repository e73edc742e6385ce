use modnet_serde::SerdeErr;
use thiserror::Error;

/// Errors that can occur during codec registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// No codec is registered for the value's runtime type
    #[error("No codec registered for type {type_name}. Register one with Protocol::add_codec() before sending values of this type")]
    NoCodec {
        type_name: &'static str,
    },

    /// A codec for this type already exists
    #[error("A codec for type {type_name} is already registered")]
    DuplicateCodec {
        type_name: &'static str,
    },

    /// The value handed to a codec is not of the codec's type
    #[error("Codec for {expected} was given a value of type {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The codec failed to decode its value
    #[error("Failed to decode value: {0}")]
    Serde(#[from] SerdeErr),
}
