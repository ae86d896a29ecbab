//! Typed values held by the store.

use std::collections::TryReserveError;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of value shapes a record can hold.
///
/// The serialized names (`INT`, `FLOAT`, `STRING`, `INT_ARRAY`,
/// `FLOAT_ARRAY`, `STRING_ARRAY`) are the ones written to the `type` field
/// of the JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    Int,
    Float,
    String,
    IntArray,
    FloatArray,
    StringArray,
}

impl ValueKind {
    /// Every kind, in declaration order.
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Int,
        ValueKind::Float,
        ValueKind::String,
        ValueKind::IntArray,
        ValueKind::FloatArray,
        ValueKind::StringArray,
    ];

    /// Canonical name used in persisted documents.
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Int => "INT",
            ValueKind::Float => "FLOAT",
            ValueKind::String => "STRING",
            ValueKind::IntArray => "INT_ARRAY",
            ValueKind::FloatArray => "FLOAT_ARRAY",
            ValueKind::StringArray => "STRING_ARRAY",
        }
    }

    /// Returns `true` for the three array kinds.
    pub const fn is_array(self) -> bool {
        matches!(
            self,
            ValueKind::IntArray | ValueKind::FloatArray | ValueKind::StringArray
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a type name is not one of the canonical kind names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported value type '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for ValueKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// An owned configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    String(String),
    IntArray(Vec<i32>),
    FloatArray(Vec<f32>),
    StringArray(Vec<String>),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::IntArray(_) => ValueKind::IntArray,
            Value::FloatArray(_) => ValueKind::FloatArray,
            Value::StringArray(_) => ValueKind::StringArray,
        }
    }

    /// Number of elements for array kinds, 0 for scalars.
    pub fn element_count(&self) -> usize {
        match self {
            Value::Int(_) | Value::Float(_) | Value::String(_) => 0,
            Value::IntArray(v) => v.len(),
            Value::FloatArray(v) => v.len(),
            Value::StringArray(v) => v.len(),
        }
    }

    /// Borrow this value as a read-only view.
    pub fn view(&self) -> ValueRef<'_> {
        match self {
            Value::Int(v) => ValueRef::Int(*v),
            Value::Float(v) => ValueRef::Float(*v),
            Value::String(v) => ValueRef::String(v),
            Value::IntArray(v) => ValueRef::IntArray(v),
            Value::FloatArray(v) => ValueRef::FloatArray(v),
            Value::StringArray(v) => ValueRef::StringArray(v),
        }
    }

    /// Deep copy that reports allocation failure instead of aborting.
    ///
    /// On failure every buffer allocated so far is dropped before returning.
    pub(crate) fn try_clone(&self) -> Result<Self, TryReserveError> {
        Ok(match self {
            Value::Int(v) => Value::Int(*v),
            Value::Float(v) => Value::Float(*v),
            Value::String(s) => Value::String(try_copy_str(s)?),
            Value::IntArray(v) => Value::IntArray(try_copy_slice(v)?),
            Value::FloatArray(v) => Value::FloatArray(try_copy_slice(v)?),
            Value::StringArray(v) => {
                let mut out = Vec::new();
                out.try_reserve_exact(v.len())?;
                for s in v {
                    out.push(try_copy_str(s)?);
                }
                Value::StringArray(out)
            }
        })
    }

    /// Returns the first float element that cannot be written to JSON.
    pub(crate) fn first_non_finite(&self) -> Option<f32> {
        match self {
            Value::Float(v) if !v.is_finite() => Some(*v),
            Value::FloatArray(v) => v.iter().copied().find(|f| !f.is_finite()),
            _ => None,
        }
    }
}

pub(crate) fn try_copy_str(s: &str) -> Result<String, TryReserveError> {
    let mut out = String::new();
    out.try_reserve_exact(s.len())?;
    out.push_str(s);
    Ok(out)
}

fn try_copy_slice<T: Copy>(src: &[T]) -> Result<Vec<T>, TryReserveError> {
    let mut out = Vec::new();
    out.try_reserve_exact(src.len())?;
    out.extend_from_slice(src);
    Ok(out)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<i32>> for Value {
    fn from(v: Vec<i32>) -> Self {
        Value::IntArray(v)
    }
}

impl From<&[i32]> for Value {
    fn from(v: &[i32]) -> Self {
        Value::IntArray(v.to_vec())
    }
}

impl From<Vec<f32>> for Value {
    fn from(v: Vec<f32>) -> Self {
        Value::FloatArray(v)
    }
}

impl From<&[f32]> for Value {
    fn from(v: &[f32]) -> Self {
        Value::FloatArray(v.to_vec())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::StringArray(v)
    }
}

impl From<&[&str]> for Value {
    fn from(v: &[&str]) -> Self {
        Value::StringArray(v.iter().map(|s| s.to_string()).collect())
    }
}

/// A read-only view of a stored value.
///
/// Views borrow from the store and must be dropped before the next `put`.
/// Serializes as the bare JSON value (number, string or array).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValueRef<'a> {
    Int(i32),
    Float(f32),
    String(&'a str),
    IntArray(&'a [i32]),
    FloatArray(&'a [f32]),
    StringArray(&'a [String]),
}

impl ValueRef<'_> {
    pub fn kind(&self) -> ValueKind {
        match self {
            ValueRef::Int(_) => ValueKind::Int,
            ValueRef::Float(_) => ValueKind::Float,
            ValueRef::String(_) => ValueKind::String,
            ValueRef::IntArray(_) => ValueKind::IntArray,
            ValueRef::FloatArray(_) => ValueKind::FloatArray,
            ValueRef::StringArray(_) => ValueKind::StringArray,
        }
    }

    pub fn element_count(&self) -> usize {
        match self {
            ValueRef::Int(_) | ValueRef::Float(_) | ValueRef::String(_) => 0,
            ValueRef::IntArray(v) => v.len(),
            ValueRef::FloatArray(v) => v.len(),
            ValueRef::StringArray(v) => v.len(),
        }
    }

    /// Copy the viewed data into an owned [`Value`].
    pub fn to_owned_value(&self) -> Value {
        match *self {
            ValueRef::Int(v) => Value::Int(v),
            ValueRef::Float(v) => Value::Float(v),
            ValueRef::String(v) => Value::String(v.to_string()),
            ValueRef::IntArray(v) => Value::IntArray(v.to_vec()),
            ValueRef::FloatArray(v) => Value::FloatArray(v.to_vec()),
            ValueRef::StringArray(v) => Value::StringArray(v.to_vec()),
        }
    }
}

impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRef::Int(v) => write!(f, "{}", v),
            ValueRef::Float(v) => write!(f, "{}", v),
            ValueRef::String(v) => f.write_str(v),
            ValueRef::IntArray(v) => write_list(f, v.iter()),
            ValueRef::FloatArray(v) => write_list(f, v.iter()),
            ValueRef::StringArray(v) => write_list(f, v.iter().map(|s| format!("{:?}", s))),
        }
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}
