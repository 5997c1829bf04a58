//! Byte sources the decoder reads from.
//!
//! The codec only needs "read one byte" / "read exactly N bytes" plus the
//! running offset for error reporting. [`SliceSource`] serves in-memory
//! input, [`IoSource`] adapts any [`std::io::Read`] for sequential
//! multi-value streams.

use std::io::{ErrorKind, Read};

use php_pack_buffers::{BufferError, Reader};

use crate::error::DecodeError;

/// Minimal byte-source contract consumed by the decoder.
pub trait ByteSource {
    /// Reads the next byte.
    fn next(&mut self) -> Result<u8, DecodeError>;
    /// Reads exactly `n` bytes.
    fn take(&mut self, n: usize) -> Result<Vec<u8>, DecodeError>;
    /// Number of bytes consumed so far.
    fn offset(&self) -> usize;
}

/// Byte source over an in-memory slice.
pub struct SliceSource<'a> {
    reader: Reader<'a>,
}

impl<'a> SliceSource<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(input),
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }
}

impl ByteSource for SliceSource<'_> {
    fn next(&mut self) -> Result<u8, DecodeError> {
        self.reader
            .u8()
            .map_err(|BufferError::EndOfBuffer| DecodeError::UnexpectedEnd {
                offset: self.reader.offset(),
            })
    }

    fn take(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        let offset = self.reader.offset();
        match self.reader.buf(n) {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(BufferError::EndOfBuffer) => Err(DecodeError::TruncatedInput {
                declared: n,
                offset,
            }),
        }
    }

    fn offset(&self) -> usize {
        self.reader.offset()
    }
}

/// Byte source over a caller-owned reader.
///
/// Never reads ahead of the value being decoded, so the stream position
/// after a decoded value sits right behind it and sequential values can be
/// read by sequential calls. Ownership of the reader stays with the caller.
pub struct IoSource<'a, R: Read> {
    inner: &'a mut R,
    consumed: usize,
}

impl<'a, R: Read> IoSource<'a, R> {
    pub fn new(inner: &'a mut R) -> Self {
        Self { inner, consumed: 0 }
    }
}

impl<R: Read> ByteSource for IoSource<'_, R> {
    fn next(&mut self) -> Result<u8, DecodeError> {
        let mut byte = [0u8; 1];
        match self.inner.read_exact(&mut byte) {
            Ok(()) => {
                self.consumed += 1;
                Ok(byte[0])
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(DecodeError::UnexpectedEnd {
                offset: self.consumed,
            }),
            Err(e) => Err(DecodeError::Io(e)),
        }
    }

    // The declared length is untrusted, so the buffer grows with the bytes
    // actually read instead of being allocated up front.
    fn take(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        let mut buf = Vec::new();
        let read = (&mut *self.inner)
            .take(n as u64)
            .read_to_end(&mut buf)
            .map_err(DecodeError::Io)?;
        if read < n {
            return Err(DecodeError::TruncatedInput {
                declared: n,
                offset: self.consumed,
            });
        }
        self.consumed += n;
        Ok(buf)
    }

    fn offset(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn slice_source_reports_offsets() {
        let mut src = SliceSource::new(b"abc");
        assert_eq!(src.next().unwrap(), b'a');
        assert_eq!(src.offset(), 1);
        assert!(matches!(
            src.take(5),
            Err(DecodeError::TruncatedInput {
                declared: 5,
                offset: 1
            })
        ));
        assert_eq!(src.take(2).unwrap(), b"bc");
        assert_eq!(src.remaining(), 0);
        assert!(matches!(
            src.next(),
            Err(DecodeError::UnexpectedEnd { offset: 3 })
        ));
    }

    #[test]
    fn io_source_advances_exactly() {
        let mut cursor = Cursor::new(b"abcd".to_vec());
        let mut src = IoSource::new(&mut cursor);
        assert_eq!(src.next().unwrap(), b'a');
        assert_eq!(src.take(2).unwrap(), b"bc");
        assert_eq!(src.offset(), 3);
        // Stream position is exactly past the taken bytes.
        assert_eq!(src.next().unwrap(), b'd');
    }

    #[test]
    fn io_source_eof_is_truncated_input_for_take() {
        let mut cursor = Cursor::new(b"a".to_vec());
        let mut src = IoSource::new(&mut cursor);
        assert!(matches!(
            src.take(4),
            Err(DecodeError::TruncatedInput { declared: 4, .. })
        ));
    }
}
