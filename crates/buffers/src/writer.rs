//! In-memory byte sink with flush tracking.

/// An auto-growing byte sink.
///
/// Bytes accumulate until [`flush`](Writer::flush) is called, which returns
/// everything written since the previous flush. This lets one writer produce
/// several independent encodings back to back without reallocation.
///
/// # Example
///
/// ```
/// use php_pack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(b'i');
/// writer.ascii("42");
/// assert_eq!(writer.flush(), b"i42");
/// ```
pub struct Writer {
    bytes: Vec<u8>,
    /// Position of the last flush.
    mark: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a writer with a small default capacity.
    pub fn new() -> Self {
        Self::with_capacity(4 * 1024)
    }

    /// Creates a writer with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            mark: 0,
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.bytes.len() - self.mark
    }

    /// True when nothing has been written since the last flush.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards everything written since the last flush.
    pub fn reset(&mut self) {
        self.bytes.truncate(self.mark);
    }

    /// Returns the bytes written since the last flush and advances the mark.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.bytes[self.mark..].to_vec();
        self.mark = self.bytes.len();
        out
    }

    /// Borrows the bytes written since the last flush without advancing.
    pub fn pending(&self) -> &[u8] {
        &self.bytes[self.mark..]
    }

    /// Writes a single byte.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.bytes.push(val);
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        self.bytes.extend_from_slice(buf);
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        let bytes = s.as_bytes();
        self.bytes.extend_from_slice(bytes);
        bytes.len()
    }

    /// Writes an ASCII string.
    pub fn ascii(&mut self, s: &str) {
        self.utf8(s); // ASCII is a subset of UTF-8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_buf() {
        let mut writer = Writer::new();
        writer.buf(b"abc");
        assert_eq!(writer.flush(), b"abc");
    }

    #[test]
    fn test_utf8_byte_count() {
        let mut writer = Writer::new();
        let n = writer.utf8("café");
        let data = writer.flush();
        assert_eq!(n, data.len());
        assert_eq!(n, 5);
    }

    #[test]
    fn test_flush_multiple() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        assert_eq!(writer.flush(), [0x01]);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x02]);
    }

    #[test]
    fn test_reset_discards_pending() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        assert_eq!(writer.flush(), [0x01]);
        writer.buf(b"garbage");
        writer.reset();
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x02]);
    }

    #[test]
    fn test_pending_does_not_advance() {
        let mut writer = Writer::new();
        writer.ascii("xy");
        assert_eq!(writer.pending(), b"xy");
        assert_eq!(writer.flush(), b"xy");
        assert!(writer.is_empty());
    }
}
