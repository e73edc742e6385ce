use thiserror::Error;

/// Errors that can occur while decoding values from the wire
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// Reader ran out of bytes
    #[error("Unexpected end of input: needed {needed} more byte(s), {remaining} remaining")]
    UnexpectedEof {
        needed: usize,
        remaining: usize,
    },

    /// A packed integer used more groups than its width allows
    #[error("Packed integer exceeds {max_bytes} bytes or overflows 64 bits")]
    PackedOverflow {
        max_bytes: usize,
    },

    /// A packed integer carried redundant trailing groups
    #[error("Packed integer is not minimally encoded")]
    OverlongPacked,

    /// A decoded integer does not fit the requested type
    #[error("Integer {value} is out of range for {type_name}")]
    OutOfRange {
        value: i128,
        type_name: &'static str,
    },

    /// String bytes were not valid UTF-8
    #[error("String payload is not valid UTF-8")]
    InvalidUtf8,

    /// Boolean byte was neither 0 nor 1
    #[error("Invalid boolean byte {byte:#04x}")]
    InvalidBool {
        byte: u8,
    },

    /// Option presence byte was neither 0 nor 1
    #[error("Invalid option tag {tag:#04x}")]
    InvalidOptionTag {
        tag: u8,
    },

    /// Sequence or block length exceeds the accepted maximum
    #[error("Length {length} exceeds the maximum of {max}")]
    LengthOverLimit {
        length: usize,
        max: usize,
    },

    /// A fixed-size value was announced with an unexpected length
    #[error("Expected a block of {expected} bytes, found {actual}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
}
