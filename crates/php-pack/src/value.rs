//! [`PhpValue`] — the universal value type for the php-pack codec.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::array::{ArrayKey, PhpArray};
use crate::object::{ForeignObject, PhpObject};

/// Universal value type spanning everything the wire format can carry.
///
/// - Scalars map 1:1 to the `N b i d` tags.
/// - [`Str`](PhpValue::Str) and [`Bytes`](PhpValue::Bytes) both map to the
///   byte-safe `s:` tag; `Str` is encoded as UTF-8 and its length prefix is
///   the encoded byte count, not the character count.
/// - [`Array`](PhpValue::Array) maps to `a:`; sequences travel as arrays
///   keyed `0..n-1`.
/// - [`Object`](PhpValue::Object) maps to `O:` and is the default decoded
///   form when no object hook is installed.
/// - [`Foreign`](PhpValue::Foreign) is an opaque native object; only an
///   encode-side object hook can lower it to the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum PhpValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Raw byte string; written to the wire as-is.
    Bytes(Vec<u8>),
    /// Text; written to the wire as UTF-8 bytes.
    Str(String),
    Array(PhpArray),
    Object(PhpObject),
    Foreign(ForeignObject),
}

impl From<bool> for PhpValue {
    fn from(b: bool) -> Self {
        PhpValue::Bool(b)
    }
}

impl From<i64> for PhpValue {
    fn from(n: i64) -> Self {
        PhpValue::Int(n)
    }
}

impl From<f64> for PhpValue {
    fn from(f: f64) -> Self {
        PhpValue::Float(f)
    }
}

impl From<&str> for PhpValue {
    fn from(s: &str) -> Self {
        PhpValue::Str(s.to_owned())
    }
}

impl From<String> for PhpValue {
    fn from(s: String) -> Self {
        PhpValue::Str(s)
    }
}

impl From<Vec<u8>> for PhpValue {
    fn from(b: Vec<u8>) -> Self {
        PhpValue::Bytes(b)
    }
}

impl From<Vec<PhpValue>> for PhpValue {
    fn from(items: Vec<PhpValue>) -> Self {
        PhpValue::Array(PhpArray::from(items))
    }
}

impl From<PhpArray> for PhpValue {
    fn from(arr: PhpArray) -> Self {
        PhpValue::Array(arr)
    }
}

impl From<PhpObject> for PhpValue {
    fn from(obj: PhpObject) -> Self {
        PhpValue::Object(obj)
    }
}

impl From<serde_json::Value> for PhpValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => PhpValue::Null,
            serde_json::Value::Bool(b) => PhpValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    PhpValue::Int(i)
                } else {
                    PhpValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => PhpValue::Str(s),
            serde_json::Value::Array(arr) => {
                PhpValue::Array(PhpArray::from(
                    arr.into_iter().map(PhpValue::from).collect::<Vec<_>>(),
                ))
            }
            serde_json::Value::Object(obj) => PhpValue::Array(
                obj.into_iter()
                    .map(|(k, v)| (ArrayKey::Str(k), PhpValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<PhpValue> for serde_json::Value {
    fn from(v: PhpValue) -> Self {
        match v {
            PhpValue::Null => serde_json::Value::Null,
            PhpValue::Bool(b) => serde_json::Value::Bool(b),
            PhpValue::Int(i) => serde_json::json!(i),
            PhpValue::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            PhpValue::Bytes(b) => {
                let b64 = BASE64.encode(&b);
                serde_json::Value::String(format!("data:application/octet-stream;base64,{b64}"))
            }
            PhpValue::Str(s) => serde_json::Value::String(s),
            PhpValue::Array(arr) => array_to_json(arr),
            PhpValue::Object(obj) => array_to_json(obj.into_attrs()),
            PhpValue::Foreign(_) => serde_json::Value::Null,
        }
    }
}

/// Arrays keyed `0..n-1` lower to JSON arrays, anything else to a JSON
/// object with stringified keys — the same shape PHP's own JSON conversion
/// produces.
fn array_to_json(arr: PhpArray) -> serde_json::Value {
    let is_list = arr
        .iter()
        .enumerate()
        .all(|(i, (k, _))| *k == ArrayKey::Int(i as i64));
    if is_list {
        serde_json::Value::Array(
            arr.into_iter()
                .map(|(_, v)| serde_json::Value::from(v))
                .collect(),
        )
    } else {
        serde_json::Value::Object(
            arr.into_iter()
                .map(|(k, v)| {
                    let key = match k {
                        ArrayKey::Int(i) => i.to_string(),
                        ArrayKey::Str(s) => s,
                        ArrayKey::Bytes(b) => String::from_utf8_lossy(&b).into_owned(),
                    };
                    (key, serde_json::Value::from(v))
                })
                .collect(),
        )
    }
}
