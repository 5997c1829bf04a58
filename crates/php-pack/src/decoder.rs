//! `PhpDecoder` — recursive-descent decoder for the `serialize()` wire
//! format.
//!
//! One tag byte (`N b i d s a O C`) selects the production; structural
//! separators are validated exactly where the grammar requires them. Any
//! mismatch fails immediately with the byte offset — there is no recovery
//! and no partial result.

use std::io::Read;

use crate::array::{ArrayKey, PhpArray};
use crate::error::DecodeError;
use crate::object::{DecodeObjectHook, PhpObject};
use crate::source::{ByteSource, IoSource, SliceSource};
use crate::PhpValue;

/// Longest scalar literal the decoder accepts, in bytes. Covers any i64 and
/// any printed f64 with room to spare.
const MAX_LITERAL_LEN: usize = 64;

/// Stateless wire-format decoder.
///
/// Configured once, usable for any number of independent calls.
///
/// # Example
///
/// ```
/// use php_pack::{PhpDecoder, PhpValue};
///
/// let decoder = PhpDecoder::new().decode_strings(true);
/// let value = decoder.decode(b"s:5:\"hello\";").unwrap();
/// assert_eq!(value, PhpValue::Str("hello".into()));
/// ```
pub struct PhpDecoder<'h> {
    decode_strings: bool,
    hook: Option<&'h dyn DecodeObjectHook>,
}

impl Default for PhpDecoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'h> PhpDecoder<'h> {
    pub fn new() -> Self {
        Self {
            decode_strings: false,
            hook: None,
        }
    }

    /// When set, string payloads (and string array keys) are decoded from
    /// UTF-8 into [`PhpValue::Str`] instead of being returned as raw bytes.
    pub fn decode_strings(mut self, yes: bool) -> Self {
        self.decode_strings = yes;
        self
    }

    /// Installs the decode-side object hook.
    pub fn object_hook(mut self, hook: &'h dyn DecodeObjectHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Decodes exactly one value from `input`.
    ///
    /// Trailing bytes after the value are rejected; use
    /// [`decode_with_consumed`](Self::decode_with_consumed) to decode a
    /// prefix of a larger buffer.
    pub fn decode(&self, input: &[u8]) -> Result<PhpValue, DecodeError> {
        let mut src = SliceSource::new(input);
        let value = self.read_any(&mut src)?;
        if src.remaining() > 0 {
            return Err(DecodeError::TrailingBytes {
                trailing: src.remaining(),
                offset: src.offset(),
            });
        }
        Ok(value)
    }

    /// Decodes one value and also reports how many input bytes it spanned.
    pub fn decode_with_consumed(&self, input: &[u8]) -> Result<(PhpValue, usize), DecodeError> {
        let mut src = SliceSource::new(input);
        let value = self.read_any(&mut src)?;
        Ok((value, src.offset()))
    }

    /// Decodes exactly one value from a caller-owned reader.
    ///
    /// The stream position advances past the value and no further, so
    /// sequential calls read sequential values.
    pub fn decode_from<R: Read>(&self, source: &mut R) -> Result<PhpValue, DecodeError> {
        let mut src = IoSource::new(source);
        self.read_any(&mut src)
    }

    // ---------------------------------------------------------------- grammar

    fn read_any<S: ByteSource>(&self, src: &mut S) -> Result<PhpValue, DecodeError> {
        let offset = src.offset();
        let tag = src.next()?;
        match tag {
            b'N' => {
                self.expect(src, b';')?;
                Ok(PhpValue::Null)
            }
            b'b' => self.read_bool(src),
            b'i' => self.read_int(src).map(PhpValue::Int),
            b'd' => self.read_float(src),
            b's' => self.read_string_value(src),
            b'a' => self.read_array(src).map(PhpValue::Array),
            b'O' => self.read_object(src),
            b'C' => self.read_custom_object(src),
            tag => Err(DecodeError::UnknownTag { tag, offset }),
        }
    }

    fn expect<S: ByteSource>(&self, src: &mut S, want: u8) -> Result<(), DecodeError> {
        let offset = src.offset();
        let found = src.next()?;
        if found != want {
            return Err(DecodeError::UnexpectedByte {
                expected: want as char,
                found: found as char,
                offset,
            });
        }
        Ok(())
    }

    /// Reads the literal between `:` and the terminating `;`.
    fn read_literal<S: ByteSource>(
        &self,
        src: &mut S,
        kind: &'static str,
    ) -> Result<String, DecodeError> {
        self.expect(src, b':')?;
        let offset = src.offset();
        let mut literal = String::new();
        loop {
            let byte = src.next()?;
            if byte == b';' {
                break;
            }
            if literal.len() >= MAX_LITERAL_LEN || !byte.is_ascii_graphic() {
                return Err(DecodeError::MalformedLiteral { kind, offset });
            }
            literal.push(byte as char);
        }
        if literal.is_empty() {
            return Err(DecodeError::MalformedLiteral { kind, offset });
        }
        Ok(literal)
    }

    fn read_bool<S: ByteSource>(&self, src: &mut S) -> Result<PhpValue, DecodeError> {
        self.expect(src, b':')?;
        let offset = src.offset();
        let digit = src.next()?;
        let value = match digit {
            b'0' => false,
            b'1' => true,
            _ => return Err(DecodeError::MalformedLiteral { kind: "bool", offset }),
        };
        self.expect(src, b';')?;
        Ok(PhpValue::Bool(value))
    }

    fn read_int<S: ByteSource>(&self, src: &mut S) -> Result<i64, DecodeError> {
        let offset = src.offset();
        let literal = self.read_literal(src, "int")?;
        literal
            .parse()
            .map_err(|_| DecodeError::MalformedLiteral { kind: "int", offset })
    }

    fn read_float<S: ByteSource>(&self, src: &mut S) -> Result<PhpValue, DecodeError> {
        let offset = src.offset();
        let literal = self.read_literal(src, "float")?;
        literal
            .parse()
            .map(PhpValue::Float)
            .map_err(|_| DecodeError::MalformedLiteral { kind: "float", offset })
    }

    /// Reads the decimal length/count prefix up to the terminating `:`.
    fn read_length<S: ByteSource>(&self, src: &mut S) -> Result<usize, DecodeError> {
        let offset = src.offset();
        let mut length: usize = 0;
        let mut digits = 0usize;
        loop {
            let byte = src.next()?;
            if byte == b':' {
                break;
            }
            if !byte.is_ascii_digit() {
                return Err(DecodeError::MalformedLiteral {
                    kind: "length",
                    offset,
                });
            }
            length = length
                .checked_mul(10)
                .and_then(|n| n.checked_add((byte - b'0') as usize))
                .ok_or(DecodeError::MalformedLiteral {
                    kind: "length",
                    offset,
                })?;
            digits += 1;
        }
        if digits == 0 {
            return Err(DecodeError::MalformedLiteral {
                kind: "length",
                offset,
            });
        }
        Ok(length)
    }

    /// Reads `<len>:"<len bytes>"` — the byte-counted string body shared by
    /// `s:` values, array keys and class names. The payload is taken
    /// verbatim; embedded NUL or control bytes are legal.
    fn read_string_body<S: ByteSource>(&self, src: &mut S) -> Result<Vec<u8>, DecodeError> {
        let length = self.read_length(src)?;
        self.expect(src, b'"')?;
        let bytes = src.take(length)?;
        self.expect(src, b'"')?;
        Ok(bytes)
    }

    fn read_string_value<S: ByteSource>(&self, src: &mut S) -> Result<PhpValue, DecodeError> {
        self.expect(src, b':')?;
        let offset = src.offset();
        let bytes = self.read_string_body(src)?;
        self.expect(src, b';')?;
        if self.decode_strings {
            let text = String::from_utf8(bytes)
                .map_err(|_| DecodeError::InvalidUtf8 { offset })?;
            Ok(PhpValue::Str(text))
        } else {
            Ok(PhpValue::Bytes(bytes))
        }
    }

    /// Reads one array/object key. Only `i` and `s` tags are valid here; a
    /// `}` at key position means the declared pair count overshoots the
    /// actual pairs.
    fn read_key<S: ByteSource>(&self, src: &mut S) -> Result<ArrayKey, DecodeError> {
        let offset = src.offset();
        let tag = src.next()?;
        match tag {
            b'i' => self.read_int(src).map(ArrayKey::Int),
            b's' => {
                self.expect(src, b':')?;
                let payload_offset = src.offset();
                let bytes = self.read_string_body(src)?;
                self.expect(src, b';')?;
                if self.decode_strings {
                    let text = String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 {
                        offset: payload_offset,
                    })?;
                    Ok(ArrayKey::Str(text))
                } else {
                    Ok(ArrayKey::Bytes(bytes))
                }
            }
            b'}' => Err(DecodeError::CountMismatch { offset }),
            tag => Err(DecodeError::UnknownTag { tag, offset }),
        }
    }

    /// Reads exactly `count` (key, value) pairs followed by `}`. Duplicate
    /// keys overwrite earlier ones, last write wins.
    fn read_pairs<S: ByteSource>(
        &self,
        src: &mut S,
        count: usize,
    ) -> Result<PhpArray, DecodeError> {
        let mut arr = PhpArray::with_capacity(count);
        for _ in 0..count {
            let key = self.read_key(src)?;
            let value = self.read_any(src)?;
            arr.insert(key, value);
        }
        let offset = src.offset();
        let terminator = src.next()?;
        if terminator != b'}' {
            return Err(DecodeError::CountMismatch { offset });
        }
        Ok(arr)
    }

    fn read_array<S: ByteSource>(&self, src: &mut S) -> Result<PhpArray, DecodeError> {
        self.expect(src, b':')?;
        let count = self.read_length(src)?;
        self.expect(src, b'{')?;
        self.read_pairs(src, count)
    }

    /// Reads `<len>:"<class name>":` — the class-name header shared by `O:`
    /// and `C:`.
    fn read_class_name<S: ByteSource>(&self, src: &mut S) -> Result<String, DecodeError> {
        self.expect(src, b':')?;
        let offset = src.offset();
        let bytes = self.read_string_body(src)?;
        self.expect(src, b':')?;
        String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    fn read_object<S: ByteSource>(&self, src: &mut S) -> Result<PhpValue, DecodeError> {
        let class_name = self.read_class_name(src)?;
        let count = self.read_length(src)?;
        self.expect(src, b'{')?;
        let attrs = self.read_pairs(src, count)?;
        let obj = PhpObject::new(class_name, attrs);
        match self.hook {
            Some(hook) => Ok(hook.wire_object_to_native(obj)),
            None => Ok(PhpValue::Object(obj)),
        }
    }

    /// `C:` carries an opaque custom-serialization payload. It is consumed
    /// as an indivisible byte span of exactly the declared length and never
    /// parsed as array/object content. Without a hook (or when the hook
    /// declines) the subtree decodes to `Null` — decoding still succeeds,
    /// and no structured data is fabricated from the blob.
    fn read_custom_object<S: ByteSource>(&self, src: &mut S) -> Result<PhpValue, DecodeError> {
        let class_name = self.read_class_name(src)?;
        let length = self.read_length(src)?;
        self.expect(src, b'{')?;
        let payload = src.take(length)?;
        self.expect(src, b'}')?;
        let interpreted = self
            .hook
            .and_then(|hook| hook.custom_object_to_native(&class_name, &payload));
        Ok(interpreted.unwrap_or(PhpValue::Null))
    }
}
