//! `PhpObject` stand-in and the object-hook bridge.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::array::{ArrayKey, PhpArray};
use crate::error::HookLookupError;
use crate::PhpValue;

/// Dynamic-attribute stand-in for a decoded `O:` object.
///
/// Carries the class name and the ordered attribute mapping. This is what
/// the decoder produces when no [`DecodeObjectHook`] is installed, and what
/// an [`EncodeObjectHook`] must produce for the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct PhpObject {
    class_name: String,
    attrs: PhpArray,
}

impl PhpObject {
    pub fn new(class_name: impl Into<String>, attrs: PhpArray) -> Self {
        Self {
            class_name: class_name.into(),
            attrs,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn attrs(&self) -> &PhpArray {
        &self.attrs
    }

    pub fn into_attrs(self) -> PhpArray {
        self.attrs
    }

    /// Attribute lookup by name.
    ///
    /// Attribute keys are byte strings when the decoder ran without
    /// `decode_strings`, so both spellings of the name are tried.
    pub fn get(&self, name: &str) -> Option<&PhpValue> {
        self.attrs
            .get(name)
            .or_else(|| self.attrs.get(name.as_bytes().to_vec()))
    }

    /// Sets an attribute, overwriting an existing one in place.
    pub fn set(&mut self, name: impl Into<ArrayKey>, value: impl Into<PhpValue>) {
        self.attrs.insert(name, value);
    }
}

/// An opaque native object carried inside a [`PhpValue`].
///
/// The codec has no built-in rule for it; it can only be encoded by
/// lowering it through an [`EncodeObjectHook`]. Equality is pointer
/// identity, since the payload type is erased.
#[derive(Clone)]
pub struct ForeignObject(Arc<dyn Any + Send + Sync>);

impl ForeignObject {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// Borrows the erased payload, e.g. to pass to an encode hook.
    pub fn as_any(&self) -> &(dyn Any + Send + Sync) {
        &*self.0
    }
}

impl fmt::Debug for ForeignObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ForeignObject").finish()
    }
}

impl PartialEq for ForeignObject {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Encode-side object hook: lowers an opaque native object to a wire object.
///
/// Called only when the encoder meets a [`PhpValue::Foreign`] value — every
/// other kind has a built-in rule. Returning [`HookLookupError`] signals
/// "I don't know this type", which the encoder surfaces as
/// [`EncodeError::UnsupportedType`](crate::EncodeError::UnsupportedType).
pub trait EncodeObjectHook {
    fn native_to_wire_object(
        &self,
        obj: &(dyn Any + Send + Sync),
    ) -> Result<PhpObject, HookLookupError>;
}

/// Decode-side object hook: raises wire objects to native values.
pub trait DecodeObjectHook {
    /// Called for every decoded `O:` object; the return value replaces the
    /// stand-in as the decoded result.
    fn wire_object_to_native(&self, obj: PhpObject) -> PhpValue;

    /// Offered every decoded `C:` custom object together with its opaque
    /// payload. Returning `None` falls back to the default handling
    /// (the subtree decodes to [`PhpValue::Null`]).
    fn custom_object_to_native(&self, _class_name: &str, _payload: &[u8]) -> Option<PhpValue> {
        None
    }
}

impl<F> EncodeObjectHook for F
where
    F: Fn(&(dyn Any + Send + Sync)) -> Result<PhpObject, HookLookupError>,
{
    fn native_to_wire_object(
        &self,
        obj: &(dyn Any + Send + Sync),
    ) -> Result<PhpObject, HookLookupError> {
        self(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_lookup_tries_both_spellings() {
        let mut attrs = PhpArray::new();
        attrs.insert(b"username".to_vec(), PhpValue::Int(1));
        let obj = PhpObject::new("WP_User", attrs);
        assert_eq!(obj.get("username"), Some(&PhpValue::Int(1)));
        assert_eq!(obj.get("missing"), None);
    }

    #[test]
    fn equality_is_class_name_plus_attrs() {
        let mut a = PhpObject::new("stdClass", PhpArray::new());
        a.set("x", 1i64);
        let mut b = PhpObject::new("stdClass", PhpArray::new());
        b.set("x", 1i64);
        assert_eq!(a, b);
        let c = PhpObject::new("Other", a.attrs().clone());
        assert_ne!(a, c);
    }

    #[test]
    fn foreign_equality_is_identity() {
        let a = ForeignObject::new(42u32);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, ForeignObject::new(42u32));
        assert_eq!(a.downcast_ref::<u32>(), Some(&42));
    }
}
