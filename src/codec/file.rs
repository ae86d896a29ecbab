//! Text and file persistence built on the document codec.

use std::path::Path;

use crate::kv::Store;
use crate::logging::{debug, info};

use super::error::CodecError;
use super::format::{DecodeReport, Decoded, decode, decode_into, encode};

/// Render a store as JSON text.
pub fn to_string(store: &Store, pretty: bool) -> Result<String, CodecError> {
    let document = encode(store)?;
    let text = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    text.map_err(|e| CodecError::Encode(e.to_string()))
}

/// Parse JSON text and decode it into a new store.
pub fn from_str(text: &str) -> Result<Decoded, CodecError> {
    let document: serde_json::Value = serde_json::from_str(text).map_err(CodecError::Parse)?;
    decode(&document)
}

/// Write a store to `path` as pretty-printed JSON.
///
/// The document is fully rendered before the file is touched.
pub fn save(store: &Store, path: impl AsRef<Path>) -> Result<(), CodecError> {
    let path = path.as_ref();
    let text = to_string(store, true)?;
    std::fs::write(path, text).map_err(|e| CodecError::io(path, e))?;
    info!(path = %path.display(), records = store.len(), "saved store");
    Ok(())
}

/// Read and decode the store persisted at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Decoded, CodecError> {
    let path = path.as_ref();
    let text = read(path)?;
    let decoded = from_str(&text)?;
    info!(path = %path.display(), summary = %decoded.report.summary(), "loaded store");
    Ok(decoded)
}

/// Read the store persisted at `path` into an existing store.
pub fn load_into(store: &mut Store, path: impl AsRef<Path>) -> Result<DecodeReport, CodecError> {
    let path = path.as_ref();
    let text = read(path)?;
    let document: serde_json::Value = serde_json::from_str(&text).map_err(CodecError::Parse)?;
    let report = decode_into(store, &document)?;
    info!(path = %path.display(), summary = %report.summary(), "loaded into store");
    Ok(report)
}

fn read(path: &Path) -> Result<String, CodecError> {
    debug!(path = %path.display(), "reading document");
    std::fs::read_to_string(path).map_err(|e| CodecError::io(path, e))
}
