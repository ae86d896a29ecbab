//! Error types for the codec module.

use std::fmt;

use thiserror::Error;

use crate::kv::{StoreError, ValueKind};

/// Errors that abort a whole encode, decode, load or save operation.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl CodecError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Why a single document entry was rejected during decoding.
///
/// Entry errors never abort decoding; they are collected in the
/// [`DecodeReport`](super::DecodeReport).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    #[error("missing or non-string '{0}' field")]
    MissingField(&'static str),

    #[error("unsupported type '{0}'")]
    UnsupportedType(String),

    #[error("invalid {kind} value: {reason}")]
    InvalidValue { kind: ValueKind, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A document entry that could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    /// Position of the entry in the top-level array.
    pub index: usize,
    /// The entry's key, when it could be read.
    pub key: Option<String>,
    pub error: EntryError,
}

impl fmt::Display for RejectedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "entry {} ('{}'): {}", self.index, key, self.error),
            None => write!(f, "entry {}: {}", self.index, self.error),
        }
    }
}
