//! Error types for encoding, decoding and the sequence helpers.

use thiserror::Error;

use crate::array::ArrayKey;

/// Errors raised while encoding a value.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// No built-in rule matched and no object hook recognized the value.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    /// The caller-provided sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while decoding wire bytes.
///
/// Every variant carries the byte offset at which the problem was detected.
/// Decoding never recovers or guesses; the first mismatch terminates the
/// call.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// First byte of a value is not one of the recognized tags.
    #[error("unknown tag byte 0x{tag:02x} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    /// A structural separator was not where the grammar requires it.
    #[error("expected {expected:?}, found {found:?} at offset {offset}")]
    UnexpectedByte {
        expected: char,
        found: char,
        offset: usize,
    },
    /// A scalar literal could not be parsed as the expected form.
    #[error("malformed {kind} literal at offset {offset}")]
    MalformedLiteral { kind: &'static str, offset: usize },
    /// A declared byte length exceeds the remaining input.
    #[error("declared length {declared} exceeds remaining input at offset {offset}")]
    TruncatedInput { declared: usize, offset: usize },
    /// An array/object pair count does not match the terminator position.
    #[error("container count does not match terminator at offset {offset}")]
    CountMismatch { offset: usize },
    /// A string payload is not valid UTF-8 (only with `decode_strings`).
    #[error("invalid UTF-8 in string payload at offset {offset}")]
    InvalidUtf8 { offset: usize },
    /// Input ended in the middle of a value.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },
    /// Bytes remained after the single expected top-level value.
    #[error("{trailing} trailing bytes after value at offset {offset}")]
    TrailingBytes { trailing: usize, offset: usize },
    /// The caller-provided source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Raised by an [`EncodeObjectHook`](crate::EncodeObjectHook) to
/// signal "I don't know this type".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("object hook lookup failed: {0}")]
pub struct HookLookupError(pub String);

/// Raised by the sequence helpers when a decoded array is not keyed by the
/// contiguous integers `0..len`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("key {key:?} does not fit a sequence of length {len}")]
pub struct KeyMismatch {
    pub len: usize,
    pub key: ArrayKey,
}
