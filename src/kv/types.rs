//! Record and array element types for the store module.

use super::value::{Value, ValueKind};

/// A key bound to one typed value.
///
/// Records are created and replaced only through the store, which keeps
/// keys unique and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub(crate) key: String,
    pub(crate) value: Value,
}

impl Record {
    pub(crate) fn new(key: String, value: Value) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    /// Number of array elements, 0 for scalar kinds.
    ///
    /// Derived from the value so it always matches the array length.
    pub fn element_count(&self) -> usize {
        self.value.element_count()
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for String {}
}

/// Element types that can be copied out of an array record.
///
/// Implemented for `i32`, `f32` and `String`; the element type selects the
/// expected [`ValueKind`].
pub trait ArrayElement: Clone + sealed::Sealed {
    /// The array kind holding elements of this type.
    const KIND: ValueKind;

    /// Borrow the elements if `value` is an array of this type.
    fn slice(value: &Value) -> Option<&[Self]>;
}

impl ArrayElement for i32 {
    const KIND: ValueKind = ValueKind::IntArray;

    fn slice(value: &Value) -> Option<&[Self]> {
        match value {
            Value::IntArray(v) => Some(v),
            _ => None,
        }
    }
}

impl ArrayElement for f32 {
    const KIND: ValueKind = ValueKind::FloatArray;

    fn slice(value: &Value) -> Option<&[Self]> {
        match value {
            Value::FloatArray(v) => Some(v),
            _ => None,
        }
    }
}

impl ArrayElement for String {
    const KIND: ValueKind = ValueKind::StringArray;

    fn slice(value: &Value) -> Option<&[Self]> {
        match value {
            Value::StringArray(v) => Some(v),
            _ => None,
        }
    }
}
