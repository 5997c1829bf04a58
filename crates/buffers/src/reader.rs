//! Bounds-checked byte slice reader.

use crate::BufferError;

/// A cursor over a byte slice.
///
/// Every read is bounds-checked and returns [`BufferError::EndOfBuffer`]
/// rather than panicking; the cursor does not advance on a failed read.
///
/// # Example
///
/// ```
/// use php_pack_buffers::Reader;
///
/// let mut reader = Reader::new(b"i:5;");
/// assert_eq!(reader.u8(), Ok(b'i'));
/// assert_eq!(reader.buf(2), Ok(&b":5"[..]));
/// ```
pub struct Reader<'a> {
    data: &'a [u8],
    /// Current cursor position.
    x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.x
    }

    /// Number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.x
    }

    // `n` may come from untrusted input, so compare against the remainder
    // instead of adding to the cursor.
    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if n > self.data.len() - self.x {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.check(1)?;
        Ok(self.data[self.x])
    }

    /// Reads a single byte.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.data[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let start = self.x;
        self.x += size;
        Ok(&self.data[start..self.x])
    }

    /// Advances the cursor by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), BufferError> {
        self.check(n)?;
        self.x += n;
        Ok(())
    }
}
