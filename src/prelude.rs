//! Convenient re-exports for common usage patterns.
//!
//! # Example
//!
//! ```ignore
//! use config_kv::prelude::*;
//!
//! let mut store = Store::new();
//! store.put("count", &Value::Int(42))?;
//! codec::save(&store, "config.json")?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Store types
pub use crate::kv::{ArrayElement, Record, Store, StoreError, Value, ValueKind, ValueRef};

// Codec
pub use crate::codec::{self, CodecError, DecodeReport, Decoded, EntryError, RejectedEntry};
