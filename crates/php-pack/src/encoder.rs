//! `PhpEncoder` — emits the `serialize()` wire format.

use std::io::Write;

use php_pack_buffers::Writer;

use crate::array::{ArrayKey, PhpArray};
use crate::error::EncodeError;
use crate::object::{EncodeObjectHook, ForeignObject, PhpObject};
use crate::PhpValue;

/// Wire-format encoder.
///
/// Purely functional over its argument: the only side effect is writing
/// bytes to the internal [`Writer`] (or the caller's sink for
/// [`encode_into`](Self::encode_into)).
///
/// # Example
///
/// ```
/// use php_pack::{PhpEncoder, PhpValue};
///
/// let mut enc = PhpEncoder::new();
/// assert_eq!(enc.encode(&PhpValue::Int(5)).unwrap(), b"i:5;");
/// ```
pub struct PhpEncoder<'h> {
    pub writer: Writer,
    hook: Option<&'h dyn EncodeObjectHook>,
}

impl Default for PhpEncoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'h> PhpEncoder<'h> {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
            hook: None,
        }
    }

    /// Installs the encode-side object hook.
    pub fn object_hook(mut self, hook: &'h dyn EncodeObjectHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Encodes a value to a fresh byte buffer.
    pub fn encode(&mut self, value: &PhpValue) -> Result<Vec<u8>, EncodeError> {
        self.writer.reset();
        match self.write_any(value) {
            Ok(()) => Ok(self.writer.flush()),
            Err(e) => {
                self.writer.reset();
                Err(e)
            }
        }
    }

    /// Encodes a value into a caller-provided sink.
    ///
    /// Nothing is written to the sink unless the whole value encodes.
    pub fn encode_into<W: Write>(
        &mut self,
        value: &PhpValue,
        sink: &mut W,
    ) -> Result<(), EncodeError> {
        let bytes = self.encode(value)?;
        sink.write_all(&bytes)?;
        Ok(())
    }

    pub fn write_any(&mut self, value: &PhpValue) -> Result<(), EncodeError> {
        match value {
            PhpValue::Null => self.write_null(),
            PhpValue::Bool(b) => self.write_boolean(*b),
            PhpValue::Int(i) => self.write_integer(*i),
            PhpValue::Float(f) => self.write_float(*f),
            PhpValue::Bytes(b) => self.write_bin(b),
            PhpValue::Str(s) => self.write_str(s),
            PhpValue::Array(arr) => return self.write_arr(arr),
            PhpValue::Object(obj) => return self.write_obj(obj),
            PhpValue::Foreign(obj) => return self.write_foreign(obj),
        }
        Ok(())
    }

    pub fn write_null(&mut self) {
        self.writer.ascii("N;");
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.ascii(if b { "b:1;" } else { "b:0;" });
    }

    pub fn write_integer(&mut self, int: i64) {
        self.writer.ascii("i:");
        self.writer.ascii(&int.to_string());
        self.writer.u8(b';');
    }

    /// Floats are printed as the shortest decimal string that round-trips
    /// to the same value.
    pub fn write_float(&mut self, float: f64) {
        self.writer.ascii("d:");
        self.writer.ascii(&float.to_string());
        self.writer.u8(b';');
    }

    /// Raw bytes; the length prefix is the buffer length.
    pub fn write_bin(&mut self, buf: &[u8]) {
        self.writer.ascii("s:");
        self.writer.ascii(&buf.len().to_string());
        self.writer.ascii(":\"");
        self.writer.buf(buf);
        self.writer.ascii("\";");
    }

    /// Text; the length prefix is the UTF-8 byte count, not the character
    /// count.
    pub fn write_str(&mut self, s: &str) {
        self.write_bin(s.as_bytes());
    }

    pub fn write_key(&mut self, key: &ArrayKey) {
        match key {
            ArrayKey::Int(i) => self.write_integer(*i),
            ArrayKey::Str(s) => self.write_str(s),
            ArrayKey::Bytes(b) => self.write_bin(b),
        }
    }

    /// Pairs are emitted in the array's iteration order; the format itself
    /// imposes no ordering.
    pub fn write_arr(&mut self, arr: &PhpArray) -> Result<(), EncodeError> {
        self.writer.ascii("a:");
        self.writer.ascii(&arr.len().to_string());
        self.writer.ascii(":{");
        for (key, value) in arr.iter() {
            self.write_key(key);
            self.write_any(value)?;
        }
        self.writer.u8(b'}');
        Ok(())
    }

    pub fn write_obj(&mut self, obj: &PhpObject) -> Result<(), EncodeError> {
        let name = obj.class_name().as_bytes();
        self.writer.ascii("O:");
        self.writer.ascii(&name.len().to_string());
        self.writer.ascii(":\"");
        self.writer.buf(name);
        self.writer.ascii("\":");
        self.writer.ascii(&obj.attrs().len().to_string());
        self.writer.ascii(":{");
        for (key, value) in obj.attrs().iter() {
            self.write_key(key);
            self.write_any(value)?;
        }
        self.writer.u8(b'}');
        Ok(())
    }

    fn write_foreign(&mut self, obj: &ForeignObject) -> Result<(), EncodeError> {
        let hook = self.hook.ok_or_else(|| {
            EncodeError::UnsupportedType("foreign object with no encode hook installed".into())
        })?;
        let wire = hook
            .native_to_wire_object(obj.as_any())
            .map_err(|e| EncodeError::UnsupportedType(e.0))?;
        self.write_obj(&wire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        let mut enc = PhpEncoder::new();
        assert_eq!(enc.encode(&PhpValue::Null).unwrap(), b"N;");
        assert_eq!(enc.encode(&PhpValue::Bool(true)).unwrap(), b"b:1;");
        assert_eq!(enc.encode(&PhpValue::Bool(false)).unwrap(), b"b:0;");
        assert_eq!(enc.encode(&PhpValue::Int(5)).unwrap(), b"i:5;");
        assert_eq!(enc.encode(&PhpValue::Int(-17)).unwrap(), b"i:-17;");
        assert_eq!(enc.encode(&PhpValue::Float(5.6)).unwrap(), b"d:5.6;");
    }

    #[test]
    fn string_length_prefix_counts_bytes() {
        let mut enc = PhpEncoder::new();
        assert_eq!(
            enc.encode(&PhpValue::Str("Hello world".into())).unwrap(),
            b"s:11:\"Hello world\";"
        );
        // 4 characters, 5 UTF-8 bytes.
        assert_eq!(
            enc.encode(&PhpValue::Str("café".into())).unwrap(),
            "s:5:\"café\";".as_bytes()
        );
    }

    #[test]
    fn binary_passthrough() {
        let mut enc = PhpEncoder::new();
        assert_eq!(
            enc.encode(&PhpValue::Bytes(vec![1, 2, 3])).unwrap(),
            b"s:3:\"\x01\x02\x03\";"
        );
    }

    #[test]
    fn sequence_gets_contiguous_int_keys() {
        let mut enc = PhpEncoder::new();
        let value = PhpValue::from(vec![PhpValue::Int(7), PhpValue::Int(8), PhpValue::Int(9)]);
        assert_eq!(
            enc.encode(&value).unwrap(),
            b"a:3:{i:0;i:7;i:1;i:8;i:2;i:9;}"
        );
    }

    #[test]
    fn foreign_without_hook_is_unsupported() {
        let mut enc = PhpEncoder::new();
        let value = PhpValue::Foreign(ForeignObject::new(42u8));
        assert!(matches!(
            enc.encode(&value),
            Err(EncodeError::UnsupportedType(_))
        ));
        // The failed attempt leaves no partial bytes behind.
        assert_eq!(enc.encode(&PhpValue::Int(1)).unwrap(), b"i:1;");
    }

    #[test]
    fn encode_is_reentrant_per_call() {
        let mut enc = PhpEncoder::new();
        assert_eq!(enc.encode(&PhpValue::Int(1)).unwrap(), b"i:1;");
        assert_eq!(enc.encode(&PhpValue::Int(2)).unwrap(), b"i:2;");
    }
}
