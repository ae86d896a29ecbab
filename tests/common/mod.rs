//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::approx_constant)]

use config_kv::{Store, Value};

/// A store holding one record of every kind, in a fixed order.
pub fn all_kinds_store() -> anyhow::Result<Store> {
    let mut store = Store::new();
    store.put("key_int", &Value::Int(42))?;
    store.put("key_float", &Value::Float(3.14))?;
    store.put("key_string", &Value::from("Hello, World!"))?;
    store.put("key_int_array", &Value::from(vec![1, 2, 3, 4, 5]))?;
    store.put("key_float_array", &Value::from(vec![1.1f32, 2.2, 3.3]))?;
    store.put(
        "key_string_array",
        &Value::from(&["apple", "banana", "cherry"][..]),
    )?;
    Ok(store)
}

/// Assert that two stores hold the same keys, kinds, counts and values in
/// the same order.
pub fn assert_stores_equal(left: &Store, right: &Store) {
    assert_eq!(left.len(), right.len(), "record count differs");
    for (a, b) in left.iter().zip(right.iter()) {
        assert_eq!(a.key(), b.key());
        assert_eq!(a.kind(), b.kind(), "kind differs for '{}'", a.key());
        assert_eq!(
            a.element_count(),
            b.element_count(),
            "element count differs for '{}'",
            a.key()
        );
        assert_eq!(a.value(), b.value(), "value differs for '{}'", a.key());
    }
}
