//! JSON document encoding and decoding.
//!
//! A store is written as a top-level array of entry objects:
//!
//! ```json
//! [
//!   { "key": "count", "type": "INT", "value": 42, "arraySize": 0 },
//!   { "key": "nums", "type": "INT_ARRAY", "value": [1, 2, 3], "arraySize": 3 }
//! ]
//! ```

use serde::Serialize;
use serde_json::{Map, Value as Document};

use crate::kv::{Store, Value, ValueKind, ValueRef};
use crate::logging::{debug, warn};

use super::error::{CodecError, EntryError, RejectedEntry};

const KEY_FIELD: &str = "key";
const TYPE_FIELD: &str = "type";
const VALUE_FIELD: &str = "value";
const ARRAY_SIZE_FIELD: &str = "arraySize";

/// One serialized record.
#[derive(Serialize)]
struct Entry<'a> {
    key: &'a str,
    #[serde(rename = "type")]
    kind: ValueKind,
    value: ValueRef<'a>,
    #[serde(rename = "arraySize")]
    array_size: usize,
}

/// Outcome of decoding a document into a store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    /// Entries stored successfully.
    pub loaded: usize,
    /// Top-level elements skipped because they were not objects.
    pub skipped: usize,
    /// Entries that were rejected.
    pub rejected: Vec<RejectedEntry>,
}

impl DecodeReport {
    /// Check if any entry was rejected.
    pub fn has_errors(&self) -> bool {
        !self.rejected.is_empty()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        format!(
            "Loaded: {} entries, {} skipped, {} rejected",
            self.loaded,
            self.skipped,
            self.rejected.len()
        )
    }
}

/// A freshly decoded store together with its decode report.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub store: Store,
    pub report: DecodeReport,
}

impl Decoded {
    /// Discard the report and keep the store.
    pub fn into_store(self) -> Store {
        self.store
    }
}

/// Encode a store as a JSON document, one entry per record in store order.
pub fn encode(store: &Store) -> Result<Document, CodecError> {
    let entries: Vec<Entry<'_>> = store
        .iter()
        .map(|record| Entry {
            key: record.key(),
            kind: record.kind(),
            value: record.value().view(),
            array_size: record.element_count(),
        })
        .collect();

    serde_json::to_value(&entries).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a JSON document into a new store.
///
/// Fails only if the document is not a top-level array. Individual entries
/// that cannot be stored are reported in [`Decoded::report`].
pub fn decode(document: &Document) -> Result<Decoded, CodecError> {
    let mut store = Store::new();
    let report = decode_into(&mut store, document)?;
    Ok(Decoded { store, report })
}

/// Decode a JSON document into an existing store.
///
/// Entries for keys already present replace their value when the kind
/// matches and are rejected otherwise.
pub fn decode_into(store: &mut Store, document: &Document) -> Result<DecodeReport, CodecError> {
    let elements = document.as_array().ok_or_else(|| {
        CodecError::Decode(format!(
            "expected a top-level array, found {}",
            json_type_name(document)
        ))
    })?;

    let mut report = DecodeReport::default();

    for (index, element) in elements.iter().enumerate() {
        let Some(object) = element.as_object() else {
            debug!(index, "skipping non-object element");
            report.skipped += 1;
            continue;
        };

        let key = object.get(KEY_FIELD).and_then(Document::as_str);
        let result = match key {
            Some(key) => decode_entry(object).and_then(|value| {
                store.put_owned(key, value).map_err(EntryError::from)
            }),
            None => Err(EntryError::MissingField(KEY_FIELD)),
        };

        match result {
            Ok(()) => report.loaded += 1,
            Err(error) => {
                debug!(index, key = ?key, %error, "rejecting entry");
                report.rejected.push(RejectedEntry {
                    index,
                    key: key.map(str::to_string),
                    error,
                });
            }
        }
    }

    Ok(report)
}

fn decode_entry(object: &Map<String, Document>) -> Result<Value, EntryError> {
    let type_name = object
        .get(TYPE_FIELD)
        .and_then(Document::as_str)
        .ok_or(EntryError::MissingField(TYPE_FIELD))?;
    let kind: ValueKind = type_name
        .parse()
        .map_err(|_| EntryError::UnsupportedType(type_name.to_string()))?;

    let raw = object
        .get(VALUE_FIELD)
        .ok_or_else(|| EntryError::InvalidValue {
            kind,
            reason: format!("missing '{}' field", VALUE_FIELD),
        })?;
    let value = decode_value(kind, raw)?;

    // The array itself is authoritative; arraySize is redundant metadata.
    if kind.is_array() {
        let declared = object.get(ARRAY_SIZE_FIELD).and_then(Document::as_u64);
        if let Some(declared) = declared {
            if usize::try_from(declared).ok() != Some(value.element_count()) {
                warn!(
                    declared,
                    actual = value.element_count(),
                    "arraySize does not match array length, using array length"
                );
            }
        }
    }

    Ok(value)
}

fn decode_value(kind: ValueKind, raw: &Document) -> Result<Value, EntryError> {
    let invalid = |reason: String| EntryError::InvalidValue { kind, reason };

    match kind {
        ValueKind::Int => json_to_i32(raw)
            .map(Value::Int)
            .ok_or_else(|| invalid(format!("expected a number, found {}", json_type_name(raw)))),
        ValueKind::Float => json_to_f32(raw)
            .map(Value::Float)
            .ok_or_else(|| invalid(format!("expected a number, found {}", json_type_name(raw)))),
        ValueKind::String => raw
            .as_str()
            .map(Value::from)
            .ok_or_else(|| invalid(format!("expected a string, found {}", json_type_name(raw)))),
        ValueKind::IntArray => {
            decode_elements(raw, json_to_i32, "number").map(Value::IntArray).map_err(invalid)
        }
        ValueKind::FloatArray => {
            decode_elements(raw, json_to_f32, "number").map(Value::FloatArray).map_err(invalid)
        }
        ValueKind::StringArray => {
            decode_elements(raw, |e| e.as_str().map(str::to_string), "string")
                .map(Value::StringArray)
                .map_err(invalid)
        }
    }
}

/// Convert every element of a JSON array, staging them in a new buffer.
fn decode_elements<T>(
    raw: &Document,
    convert: impl Fn(&Document) -> Option<T>,
    expected: &str,
) -> Result<Vec<T>, String> {
    let items = raw
        .as_array()
        .ok_or_else(|| format!("expected an array, found {}", json_type_name(raw)))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            convert(item).ok_or_else(|| {
                format!(
                    "element {} should be a {}, found {}",
                    i,
                    expected,
                    json_type_name(item)
                )
            })
        })
        .collect()
}

/// Integer coercion: fractions truncate toward zero and out-of-range
/// values saturate to the `i32` bounds.
fn json_to_i32(raw: &Document) -> Option<i32> {
    if let Some(n) = raw.as_i64() {
        return Some(i32::try_from(n).unwrap_or(if n < 0 { i32::MIN } else { i32::MAX }));
    }
    if raw.as_u64().is_some() {
        return Some(i32::MAX);
    }
    raw.as_f64().map(|f| f as i32)
}

/// Float coercion: numbers are narrowed from f64 to f32.
fn json_to_f32(raw: &Document) -> Option<f32> {
    raw.as_f64().map(|f| f as f32)
}

fn json_type_name(raw: &Document) -> &'static str {
    match raw {
        Document::Null => "null",
        Document::Bool(_) => "a boolean",
        Document::Number(_) => "a number",
        Document::String(_) => "a string",
        Document::Array(_) => "an array",
        Document::Object(_) => "an object",
    }
}
