//! Unified error type for the config-kv library.
//!
//! This module provides a single [`Error`] type that wraps the store and
//! codec errors, so application code can use one error type throughout.

use thiserror::Error;

use crate::codec::CodecError;
use crate::kv::StoreError;

/// Unified error type for all config-kv operations.
///
/// # Example
///
/// ```ignore
/// use config_kv::{Result, Store, Value, codec};
///
/// fn bump(path: &str) -> Result<()> {
///     let mut store = codec::load(path)?.into_store();
///     let count = store.get_int("count")?;
///     store.put("count", &Value::Int(count + 1))?;
///     codec::save(&store, path)?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from store operations.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Error from encoding, decoding or persisting a store.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a store error.
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns `true` if this is a codec error.
    pub fn is_codec(&self) -> bool {
        matches!(self, Self::Codec(_))
    }

    /// Returns `true` if this is an I/O error, including file errors raised
    /// while loading or saving.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Codec(CodecError::Io { .. }))
    }
}
