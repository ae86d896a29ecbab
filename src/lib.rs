//! A typed in-memory key-value configuration store with JSON persistence.
//!
//! Each key is bound to a value of one fixed kind: an `i32`, an `f32`, a
//! string, or an array of one of those. Writing a different kind to an
//! existing key is rejected, and typed fetches check the kind as well.
//! Stores round-trip through a JSON document of `{key, type, value,
//! arraySize}` entries.
//!
//! # Module Organization
//!
//! - [`kv`]: Values, records and the store
//! - [`codec`]: JSON encoding/decoding and file persistence
//! - [`error`]: Unified error types
//! - [`prelude`]: Convenient re-exports
//! - `cli`: Commands, settings and logging setup for the `config-kv` binary (requires `cli` feature)
//! - `logging`: Conditional logging macros (internal)
//!
//! # Features
//!
//! - `logging`: Enable tracing-based logging
//! - `cli`: Build the `config-kv` command-line tool
//!
//! # Example
//!
//! ```ignore
//! use config_kv::prelude::*;
//!
//! let mut store = Store::new();
//! store.put("count", &Value::Int(42))?;
//! store.put("nums", &Value::from(vec![1, 2, 3, 4, 5]))?;
//!
//! let text = codec::to_string(&store, true)?;
//! let loaded = codec::from_str(&text)?.into_store();
//! assert_eq!(loaded.get_int_array("nums")?, &[1, 2, 3, 4, 5]);
//! ```

#[macro_use]
pub(crate) mod logging;

#[cfg(feature = "cli")]
pub mod cli;
pub mod codec;
pub mod error;
pub mod kv;
pub mod prelude;

// Re-export unified error types
pub use error::{Error, Result};

// Re-export store types at crate root for convenience
pub use kv::{ArrayElement, Record, Store, StoreError, Value, ValueKind, ValueRef};
