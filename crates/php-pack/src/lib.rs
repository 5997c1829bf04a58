//! Codec for the PHP `serialize()` / `unserialize()` wire format.
//!
//! The format is a tagged, length-prefixed textual encoding: scalars
//! (`N; b:1; i:5; d:5.6;`), byte-safe strings (`s:11:"Hello world";`),
//! ordered associative arrays (`a:…:{…}`) and objects with plain attribute
//! lists (`O:`) or opaque custom payloads (`C:`). Length prefixes always
//! count bytes, never characters, so arbitrary binary payloads survive.
//!
//! Encoding walks a [`PhpValue`]; decoding runs a recursive descent over a
//! byte slice or any [`std::io::Read`]. Both directions accept an optional
//! object hook bridging native objects and wire objects.
//!
//! ```
//! use php_pack::{decode, encode, to_list, PhpValue};
//!
//! let bytes = encode(&PhpValue::from(vec![
//!     PhpValue::Int(7),
//!     PhpValue::Int(8),
//!     PhpValue::Int(9),
//! ]))
//! .unwrap();
//! assert_eq!(bytes, b"a:3:{i:0;i:7;i:1;i:8;i:2;i:9;}");
//!
//! let PhpValue::Array(arr) = decode(&bytes).unwrap() else {
//!     panic!("expected array");
//! };
//! let list = to_list(arr).unwrap();
//! assert_eq!(list, vec![PhpValue::Int(7), PhpValue::Int(8), PhpValue::Int(9)]);
//! ```

mod array;
mod decoder;
mod encoder;
mod error;
mod object;
mod sequence;
mod source;
mod value;

pub use array::{ArrayKey, PhpArray};
pub use decoder::PhpDecoder;
pub use encoder::PhpEncoder;
pub use error::{DecodeError, EncodeError, HookLookupError, KeyMismatch};
pub use object::{DecodeObjectHook, EncodeObjectHook, ForeignObject, PhpObject};
pub use sequence::{to_list, to_tuple};
pub use source::{ByteSource, IoSource, SliceSource};
pub use value::PhpValue;

use std::io::{Read, Write};

/// Encodes a value to wire bytes.
pub fn encode(value: &PhpValue) -> Result<Vec<u8>, EncodeError> {
    PhpEncoder::new().encode(value)
}

/// Encodes a value to wire bytes with an encode-side object hook.
pub fn encode_with_hook(
    value: &PhpValue,
    hook: &dyn EncodeObjectHook,
) -> Result<Vec<u8>, EncodeError> {
    PhpEncoder::new().object_hook(hook).encode(value)
}

/// Encodes a value into a caller-provided sink.
pub fn encode_into<W: Write>(value: &PhpValue, sink: &mut W) -> Result<(), EncodeError> {
    PhpEncoder::new().encode_into(value, sink)
}

/// Encodes a value into a caller-provided sink with an encode-side object
/// hook.
pub fn encode_into_with_hook<W: Write>(
    value: &PhpValue,
    sink: &mut W,
    hook: &dyn EncodeObjectHook,
) -> Result<(), EncodeError> {
    PhpEncoder::new().object_hook(hook).encode_into(value, sink)
}

/// Decodes exactly one value from a byte slice; trailing bytes are an
/// error. Strings come back as [`PhpValue::Bytes`]; configure a
/// [`PhpDecoder`] for `decode_strings` or an object hook.
pub fn decode(input: &[u8]) -> Result<PhpValue, DecodeError> {
    PhpDecoder::new().decode(input)
}

/// Decodes exactly one value from a caller-owned reader, advancing the
/// stream position past it.
pub fn decode_from<R: Read>(source: &mut R) -> Result<PhpValue, DecodeError> {
    PhpDecoder::new().decode_from(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_wire_examples() {
        assert_eq!(encode(&PhpValue::Int(5)).unwrap(), b"i:5;");
        assert_eq!(encode(&PhpValue::Float(5.6)).unwrap(), b"d:5.6;");
        assert_eq!(
            encode(&PhpValue::Str("Hello world".into())).unwrap(),
            b"s:11:\"Hello world\";"
        );
        assert_eq!(
            encode(&PhpValue::from(vec![
                PhpValue::Int(7),
                PhpValue::Int(8),
                PhpValue::Int(9)
            ]))
            .unwrap(),
            b"a:3:{i:0;i:7;i:1;i:8;i:2;i:9;}"
        );
    }

    #[test]
    fn scalar_roundtrips() {
        for value in [
            PhpValue::Null,
            PhpValue::Bool(true),
            PhpValue::Bool(false),
            PhpValue::Int(0),
            PhpValue::Int(i64::MIN),
            PhpValue::Int(i64::MAX),
            PhpValue::Float(0.25),
            PhpValue::Float(-1.0e300),
            PhpValue::Bytes(vec![0, 1, 2, 255]),
        ] {
            let bytes = encode(&value).unwrap();
            assert_eq!(decode(&bytes).unwrap(), value, "roundtrip of {value:?}");
        }
    }

    #[test]
    fn stream_roundtrip_two_values() {
        let mut sink: Vec<u8> = Vec::new();
        encode_into(&PhpValue::from(vec![PhpValue::Int(1), PhpValue::Int(2)]), &mut sink).unwrap();
        encode_into(&PhpValue::Int(42), &mut sink).unwrap();

        let mut source = std::io::Cursor::new(sink);
        let first = decode_from(&mut source).unwrap();
        let second = decode_from(&mut source).unwrap();
        match first {
            PhpValue::Array(arr) => assert_eq!(
                to_list(arr).unwrap(),
                vec![PhpValue::Int(1), PhpValue::Int(2)]
            ),
            other => panic!("expected array, got {other:?}"),
        }
        assert_eq!(second, PhpValue::Int(42));
    }
}
