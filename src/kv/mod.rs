//! Typed key-value store module.
//!
//! This module provides an in-memory store where each key is bound to a
//! value of one fixed [`ValueKind`]. Once a key exists its kind never
//! changes.

mod error;
mod store;
mod types;
mod value;

pub use error::StoreError;
pub use store::{DEFAULT_CAPACITY, Store};
pub use types::{ArrayElement, Record};
pub use value::{ParseKindError, Value, ValueKind, ValueRef};
