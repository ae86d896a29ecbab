//! JSON persistence for stores.
//!
//! [`encode`] and [`decode`] translate between a [`Store`](crate::kv::Store)
//! and a `serde_json` document tree. [`save`] and [`load`] add the text and
//! file layer on top.
//!
//! Decoding is resilient per entry: malformed entries are collected in a
//! [`DecodeReport`] while the remaining entries are still loaded. Only an
//! unreadable file, malformed JSON text or a non-array document fail the
//! whole operation.

mod error;
mod file;
mod format;

pub use error::{CodecError, EntryError, RejectedEntry};
pub use file::{from_str, load, load_into, save, to_string};
pub use format::{DecodeReport, Decoded, decode, decode_into, encode};
