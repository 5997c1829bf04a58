//! Buffer error type.

use std::fmt;

/// Errors raised by bounds-checked [`Reader`](crate::Reader) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A read was attempted past the end of the buffer.
    EndOfBuffer,
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "unexpected end of buffer"),
        }
    }
}

impl std::error::Error for BufferError {}
