//! Error types for the store module.

use thiserror::Error;

use super::value::ValueKind;

/// Errors that can occur during store operations.
///
/// A failed operation never leaves the store partially modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Type mismatch for key '{key}': stored as {stored}, requested {requested}")]
    TypeMismatch {
        key: String,
        stored: ValueKind,
        requested: ValueKind,
    },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Buffer too small: need {needed} elements, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Out of memory while storing key '{0}'")]
    OutOfMemory(String),
}

impl StoreError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn type_mismatch(key: &str, stored: ValueKind, requested: ValueKind) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            stored,
            requested,
        }
    }

    /// Returns `true` if this is a [`StoreError::TypeMismatch`].
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Returns `true` if this is a [`StoreError::KeyNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }
}
