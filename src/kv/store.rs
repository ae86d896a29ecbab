//! In-memory configuration store.

use crate::logging::{debug, trace};

use super::error::StoreError;
use super::types::{ArrayElement, Record};
use super::value::{Value, ValueKind, ValueRef, try_copy_str};

/// Initial record capacity of a new store.
pub const DEFAULT_CAPACITY: usize = 10;

/// Ordered collection of typed records with unique keys.
///
/// Records keep their insertion order, which is the order they are
/// serialized in. Lookups scan linearly.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    records: Vec<Record>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create an empty store with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty store able to hold `capacity` records before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Record::key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.record(key).is_some()
    }

    /// The kind stored under `key`, if any.
    pub fn kind_of(&self, key: &str) -> Option<ValueKind> {
        self.record(key).map(Record::kind)
    }

    pub fn record(&self, key: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.key == key)
    }

    /// Store a value under `key` with an explicit kind and element count.
    ///
    /// `kind` must match the value's tag and, for array kinds,
    /// `element_count` must equal the array length. The count is ignored
    /// for scalar kinds.
    pub fn put_checked(
        &mut self,
        key: &str,
        kind: ValueKind,
        value: &Value,
        element_count: usize,
    ) -> Result<(), StoreError> {
        if value.kind() != kind {
            return Err(StoreError::invalid(format!(
                "value for key '{}' is {} but was declared {}",
                key,
                value.kind(),
                kind
            )));
        }
        if kind.is_array() && element_count != value.element_count() {
            return Err(StoreError::invalid(format!(
                "element count {} for key '{}' does not match array length {}",
                element_count,
                key,
                value.element_count()
            )));
        }
        self.put(key, value)
    }

    /// Store a deep copy of `value` under `key`.
    ///
    /// Inserts a new record if the key is absent. If the key exists with the
    /// same kind the value is replaced; a different kind is rejected with
    /// [`StoreError::TypeMismatch`] and the existing record is untouched.
    pub fn put(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        validate_key(key)?;
        validate_value(key, value)?;
        if let Some(stored) = self.kind_of(key) {
            if stored != value.kind() {
                return Err(StoreError::type_mismatch(key, stored, value.kind()));
            }
        }

        let copy = value
            .try_clone()
            .map_err(|_| StoreError::OutOfMemory(key.to_string()))?;
        self.put_owned(key, copy)
    }

    /// Store `value` under `key`, taking ownership of its buffers.
    ///
    /// Same semantics as [`Store::put`] without the copy.
    pub fn put_owned(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        validate_key(key)?;
        validate_value(key, &value)?;

        if let Some(record) = self.records.iter_mut().find(|r| r.key == key) {
            let stored = record.kind();
            if stored != value.kind() {
                return Err(StoreError::type_mismatch(key, stored, value.kind()));
            }
            trace!(key = key, kind = %stored, "replacing value");
            // The previous value is dropped only once the new one is in place.
            record.value = value;
            return Ok(());
        }

        self.records
            .try_reserve(1)
            .map_err(|_| StoreError::OutOfMemory(key.to_string()))?;
        let owned_key = try_copy_str(key).map_err(|_| StoreError::OutOfMemory(key.to_string()))?;

        debug!(key = key, kind = %value.kind(), count = value.element_count(), "inserting record");
        self.records.push(Record::new(owned_key, value));
        Ok(())
    }

    /// Fetch a read-only view of the value under `key`.
    ///
    /// Fails with [`StoreError::KeyNotFound`] if the key is absent and with
    /// [`StoreError::TypeMismatch`] if it holds a different kind.
    pub fn get(&self, key: &str, expected: ValueKind) -> Result<ValueRef<'_>, StoreError> {
        self.lookup(key, expected).map(|r| r.value.view())
    }

    /// Fetch a read-only view of the value under `key`, whatever its kind.
    pub fn get_any(&self, key: &str) -> Result<ValueRef<'_>, StoreError> {
        validate_key(key)?;
        self.record(key)
            .map(|r| r.value.view())
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))
    }

    pub fn get_int(&self, key: &str) -> Result<i32, StoreError> {
        match &self.lookup(key, ValueKind::Int)?.value {
            Value::Int(v) => Ok(*v),
            other => Err(StoreError::type_mismatch(key, other.kind(), ValueKind::Int)),
        }
    }

    pub fn get_float(&self, key: &str) -> Result<f32, StoreError> {
        match &self.lookup(key, ValueKind::Float)?.value {
            Value::Float(v) => Ok(*v),
            other => Err(StoreError::type_mismatch(key, other.kind(), ValueKind::Float)),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str, StoreError> {
        match &self.lookup(key, ValueKind::String)?.value {
            Value::String(v) => Ok(v),
            other => Err(StoreError::type_mismatch(key, other.kind(), ValueKind::String)),
        }
    }

    pub fn get_int_array(&self, key: &str) -> Result<&[i32], StoreError> {
        self.array(key)
    }

    pub fn get_float_array(&self, key: &str) -> Result<&[f32], StoreError> {
        self.array(key)
    }

    pub fn get_string_array(&self, key: &str) -> Result<&[String], StoreError> {
        self.array(key)
    }

    /// Copy an array value into a caller-provided buffer.
    ///
    /// Returns the number of elements written. The buffer must hold at least
    /// the record's element count, otherwise [`StoreError::BufferTooSmall`]
    /// is returned and the buffer is left untouched.
    pub fn copy_array_into<T: ArrayElement>(
        &self,
        key: &str,
        out: &mut [T],
    ) -> Result<usize, StoreError> {
        let src = self.array::<T>(key)?;
        let available = out.len();
        let dst = out
            .get_mut(..src.len())
            .ok_or(StoreError::BufferTooSmall {
                needed: src.len(),
                available,
            })?;
        dst.clone_from_slice(src);
        Ok(src.len())
    }

    /// Remove the record under `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Result<Value, StoreError> {
        validate_key(key)?;
        let index = self
            .records
            .iter()
            .position(|r| r.key == key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))?;
        debug!(key = key, "removing record");
        Ok(self.records.remove(index).value)
    }

    fn array<T: ArrayElement>(&self, key: &str) -> Result<&[T], StoreError> {
        let record = self.lookup(key, T::KIND)?;
        T::slice(&record.value)
            .ok_or_else(|| StoreError::type_mismatch(key, record.kind(), T::KIND))
    }

    fn lookup(&self, key: &str, expected: ValueKind) -> Result<&Record, StoreError> {
        validate_key(key)?;
        let record = self
            .record(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))?;
        if record.kind() != expected {
            return Err(StoreError::type_mismatch(key, record.kind(), expected));
        }
        Ok(record)
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::invalid("key must not be empty"));
    }
    Ok(())
}

fn validate_value(key: &str, value: &Value) -> Result<(), StoreError> {
    match value.first_non_finite() {
        Some(f) => Err(StoreError::invalid(format!(
            "non-finite float {} for key '{}' cannot be persisted",
            f, key
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> Store {
        let mut store = Store::new();
        store.put("count", &Value::Int(42)).unwrap();
        store.put("ratio", &Value::Float(2.75)).unwrap();
        store.put("greeting", &Value::from("Hello, World!")).unwrap();
        store.put("nums", &Value::from(vec![1, 2, 3, 4, 5])).unwrap();
        store.put("floats", &Value::from(vec![1.1f32, 2.2, 3.3])).unwrap();
        store
            .put("fruit", &Value::from(&["apple", "banana", "cherry"][..]))
            .unwrap();
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.capacity() >= DEFAULT_CAPACITY);
    }

    #[test]
    fn test_put_then_get_each_kind() {
        let store = sample_store();
        assert_eq!(store.get_int("count"), Ok(42));
        assert_eq!(store.get_float("ratio"), Ok(2.75));
        assert_eq!(store.get_str("greeting"), Ok("Hello, World!"));
        assert_eq!(store.get_int_array("nums"), Ok(&[1, 2, 3, 4, 5][..]));
        assert_eq!(store.get_float_array("floats"), Ok(&[1.1f32, 2.2, 3.3][..]));
        assert_eq!(
            store.get_string_array("fruit").unwrap(),
            ["apple", "banana", "cherry"]
        );
        assert_eq!(
            store.get("nums", ValueKind::IntArray),
            Ok(ValueRef::IntArray(&[1, 2, 3, 4, 5]))
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let store = sample_store();
        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(
            keys,
            vec!["count", "ratio", "greeting", "nums", "floats", "fruit"]
        );
    }

    #[test]
    fn test_put_copies_caller_data() {
        let mut store = Store::new();
        let mut source = Value::from("original");
        store.put("k", &source).unwrap();

        if let Value::String(s) = &mut source {
            s.push_str(" changed");
        }
        assert_eq!(store.get_str("k"), Ok("original"));
    }

    #[test]
    fn test_replace_same_kind() {
        let mut store = Store::new();
        store.put("nums", &Value::from(vec![1, 2, 3])).unwrap();
        store.put("nums", &Value::from(vec![9, 8])).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_int_array("nums"), Ok(&[9, 8][..]));
        assert_eq!(store.record("nums").unwrap().element_count(), 2);
    }

    #[test]
    fn test_put_different_kind_rejected() {
        let mut store = Store::new();
        store.put("x", &Value::Int(1)).unwrap();

        let err = store.put("x", &Value::Float(2.0)).unwrap_err();
        assert_eq!(
            err,
            StoreError::TypeMismatch {
                key: "x".to_string(),
                stored: ValueKind::Int,
                requested: ValueKind::Float,
            }
        );
        assert_eq!(store.get_int("x"), Ok(1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_put_owned_different_kind_rejected() {
        let mut store = Store::new();
        store.put_owned("x", Value::from("text")).unwrap();
        let err = store.put_owned("x", Value::from(vec![1])).unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(store.get_str("x"), Ok("text"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut store = Store::new();
        assert!(matches!(
            store.put("", &Value::Int(1)),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.get("", ValueKind::Int),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let mut store = Store::new();
        assert!(matches!(
            store.put("f", &Value::Float(f32::NAN)),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.put("fa", &Value::from(vec![1.0, f32::NEG_INFINITY])),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_missing_key() {
        let store = sample_store();
        assert_eq!(
            store.get("missing", ValueKind::Int),
            Err(StoreError::KeyNotFound("missing".to_string()))
        );
        assert!(store.get_int("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_get_any() {
        let store = sample_store();
        assert_eq!(store.get_any("count").unwrap(), ValueRef::Int(42));
        assert!(store.get_any("missing").unwrap_err().is_not_found());
        assert!(matches!(
            store.get_any(""),
            Err(StoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_get_wrong_kind() {
        let store = sample_store();
        let err = store.get("count", ValueKind::Float).unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(store.get_string_array("nums").unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_put_checked_validates_kind_and_count() {
        let mut store = Store::new();
        let nums = Value::from(vec![1, 2, 3]);

        assert!(matches!(
            store.put_checked("nums", ValueKind::FloatArray, &nums, 3),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.put_checked("nums", ValueKind::IntArray, &nums, 5),
            Err(StoreError::InvalidArgument(_))
        ));
        store
            .put_checked("nums", ValueKind::IntArray, &nums, 3)
            .unwrap();
        store
            .put_checked("n", ValueKind::Int, &Value::Int(4), 0)
            .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_copy_array_into() {
        let store = sample_store();

        let mut ints = [0i32; 8];
        assert_eq!(store.copy_array_into("nums", &mut ints), Ok(5));
        assert_eq!(ints, [1, 2, 3, 4, 5, 0, 0, 0]);

        let mut strings = vec![String::new(); 3];
        assert_eq!(store.copy_array_into("fruit", &mut strings), Ok(3));
        assert_eq!(strings, ["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_copy_array_into_small_buffer() {
        let store = sample_store();
        let mut ints = [0i32; 2];
        assert_eq!(
            store.copy_array_into("nums", &mut ints),
            Err(StoreError::BufferTooSmall {
                needed: 5,
                available: 2
            })
        );
        assert_eq!(ints, [0, 0]);
    }

    #[test]
    fn test_copy_array_into_wrong_element_type() {
        let store = sample_store();
        let mut floats = [0f32; 5];
        assert!(
            store
                .copy_array_into("nums", &mut floats)
                .unwrap_err()
                .is_type_mismatch()
        );
    }

    #[test]
    fn test_grows_past_initial_capacity() {
        let mut store = Store::with_capacity(2);
        for i in 0..25 {
            store.put(&format!("key{}", i), &Value::Int(i)).unwrap();
        }
        assert_eq!(store.len(), 25);
        assert_eq!(store.get_int("key0"), Ok(0));
        assert_eq!(store.get_int("key24"), Ok(24));
    }

    #[test]
    fn test_remove() {
        let mut store = sample_store();
        assert_eq!(store.remove("count"), Ok(Value::Int(42)));
        assert!(!store.contains_key("count"));
        assert_eq!(store.len(), 5);
        assert!(store.remove("count").unwrap_err().is_not_found());
    }

    #[test]
    fn test_kind_of() {
        let store = sample_store();
        assert_eq!(store.kind_of("fruit"), Some(ValueKind::StringArray));
        assert_eq!(store.kind_of("nope"), None);
    }
}
