//! Sequence helpers.
//!
//! The wire format has no sequence tag — lists and tuples travel as arrays
//! keyed `0..n-1`. Reconstructing a sequence is therefore an explicit,
//! fallible post-processing step, not something decoding does on its own.

use crate::array::{ArrayKey, PhpArray};
use crate::error::KeyMismatch;
use crate::PhpValue;

/// Converts a decoded array back into a list.
///
/// The keys must be exactly the integers `0..len`, each present once, in
/// any order; the result is ordered by key.
pub fn to_list(arr: PhpArray) -> Result<Vec<PhpValue>, KeyMismatch> {
    let len = arr.len();
    let mut slots: Vec<Option<PhpValue>> = (0..len).map(|_| None).collect();
    for (key, value) in arr {
        match key {
            ArrayKey::Int(i) if 0 <= i && (i as usize) < len => slots[i as usize] = Some(value),
            key => return Err(KeyMismatch { len, key }),
        }
    }
    // Keys in a PhpArray are unique, so `len` in-range keys fill every slot.
    Ok(slots
        .into_iter()
        .map(|slot| slot.expect("contiguous keys fill every slot"))
        .collect())
}

/// Converts a decoded array back into a fixed-size sequence.
///
/// Same key contract as [`to_list`].
pub fn to_tuple(arr: PhpArray) -> Result<Box<[PhpValue]>, KeyMismatch> {
    to_list(arr).map(Vec::into_boxed_slice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_keys_in_any_order() {
        let arr: PhpArray = [
            (1i64, PhpValue::Int(8)),
            (0i64, PhpValue::Int(7)),
            (2i64, PhpValue::Int(9)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            to_list(arr).unwrap(),
            vec![PhpValue::Int(7), PhpValue::Int(8), PhpValue::Int(9)]
        );
    }

    #[test]
    fn empty_array_is_empty_list() {
        assert_eq!(to_list(PhpArray::new()).unwrap(), Vec::<PhpValue>::new());
    }

    #[test]
    fn gap_is_key_mismatch() {
        let arr: PhpArray = [(0i64, PhpValue::Int(1)), (2i64, PhpValue::Int(2))]
            .into_iter()
            .collect();
        assert_eq!(
            to_list(arr),
            Err(KeyMismatch {
                len: 2,
                key: ArrayKey::Int(2)
            })
        );
    }

    #[test]
    fn string_key_is_key_mismatch() {
        let arr: PhpArray = [("a", PhpValue::Int(1))].into_iter().collect();
        assert!(to_list(arr).is_err());
    }

    #[test]
    fn to_tuple_preserves_order() {
        let arr = PhpArray::from(vec![PhpValue::Bool(true), PhpValue::Null]);
        let tuple = to_tuple(arr).unwrap();
        assert_eq!(&*tuple, &[PhpValue::Bool(true), PhpValue::Null]);
    }
}
