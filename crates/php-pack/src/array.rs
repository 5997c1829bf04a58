//! `PhpArray` — the ordered associative container behind the `a:` tag.

use crate::PhpValue;

/// Key of a PHP array entry.
///
/// The wire format only knows integer and string keys. String keys surface
/// as [`ArrayKey::Str`] when the decoder runs with `decode_strings`, and as
/// [`ArrayKey::Bytes`] otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
    Bytes(Vec<u8>),
}

impl From<i64> for ArrayKey {
    fn from(n: i64) -> Self {
        ArrayKey::Int(n)
    }
}

impl From<&str> for ArrayKey {
    fn from(s: &str) -> Self {
        ArrayKey::Str(s.to_owned())
    }
}

impl From<String> for ArrayKey {
    fn from(s: String) -> Self {
        ArrayKey::Str(s)
    }
}

impl From<Vec<u8>> for ArrayKey {
    fn from(b: Vec<u8>) -> Self {
        ArrayKey::Bytes(b)
    }
}

/// Ordered associative array.
///
/// Keeps (key, value) pairs in insertion order. Inserting an existing key
/// overwrites the value in place, so the key keeps its original position —
/// matching how PHP arrays behave on assignment.
///
/// There is no native sequence tag on the wire; lists and tuples travel as
/// arrays keyed `0..n-1` and come back through
/// [`to_list`](crate::to_list) / [`to_tuple`](crate::to_tuple).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhpArray {
    entries: Vec<(ArrayKey, PhpValue)>,
}

impl PhpArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a pair. An existing key is overwritten in place.
    pub fn insert(&mut self, key: impl Into<ArrayKey>, value: impl Into<PhpValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up a value by key.
    pub fn get(&self, key: impl Into<ArrayKey>) -> Option<&PhpValue> {
        let key = key.into();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Iterates pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(ArrayKey, PhpValue)> {
        self.entries.iter()
    }
}

impl IntoIterator for PhpArray {
    type Item = (ArrayKey, PhpValue);
    type IntoIter = std::vec::IntoIter<(ArrayKey, PhpValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<ArrayKey>, V: Into<PhpValue>> FromIterator<(K, V)> for PhpArray {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut arr = PhpArray::new();
        for (k, v) in iter {
            arr.insert(k, v);
        }
        arr
    }
}

/// A sequence becomes an array keyed `0..n-1` in traversal order.
impl From<Vec<PhpValue>> for PhpArray {
    fn from(items: Vec<PhpValue>) -> Self {
        Self {
            entries: items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ArrayKey::Int(i as i64), v))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut arr = PhpArray::new();
        arr.insert("a", 1i64);
        arr.insert("b", 2i64);
        arr.insert("a", 3i64);
        assert_eq!(arr.len(), 2);
        let keys: Vec<_> = arr.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![ArrayKey::from("a"), ArrayKey::from("b")]);
        assert_eq!(arr.get("a"), Some(&PhpValue::Int(3)));
    }

    #[test]
    fn mixed_key_types_coexist() {
        let mut arr = PhpArray::new();
        arr.insert(0i64, PhpValue::Null);
        arr.insert("0", PhpValue::Bool(true));
        // Int(0) and Str("0") are distinct keys; no coercion.
        assert_eq!(arr.len(), 2);
        assert_eq!(arr.get(0i64), Some(&PhpValue::Null));
        assert_eq!(arr.get("0"), Some(&PhpValue::Bool(true)));
    }

    #[test]
    fn from_vec_assigns_contiguous_keys() {
        let arr = PhpArray::from(vec![PhpValue::Int(7), PhpValue::Int(8)]);
        let keys: Vec<_> = arr.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![ArrayKey::Int(0), ArrayKey::Int(1)]);
    }
}
