//! Shared helpers for unit and property tests.

use proptest::prelude::*;

use crate::value::{from_json, Value};

/// Parses a JSON literal, panicking on malformed test input.
pub(crate) fn json(text: &str) -> Value {
    from_json(text).unwrap_or_else(|e| panic!("bad test JSON {}: {}", text, e))
}

/// Small JSON-like trees with few distinct keys and scalars, so generated
/// pairs overlap often enough to exercise both outcomes of every predicate.
pub(crate) fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        (-3i64..3).prop_map(serde_json::Value::from),
        "[a-c]{0,2}".prop_map(serde_json::Value::from),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|fields| serde_json::Value::Object(fields.into_iter().collect())),
        ]
    })
}

pub(crate) fn arb_value() -> impl Strategy<Value = Value> {
    arb_json().prop_map(Value::from)
}

/// Plain maps only, the shape merge and reduce operate on.
pub(crate) fn arb_map() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-d]", arb_json(), 0..5)
        .prop_map(|fields| Value::from(serde_json::Value::Object(fields.into_iter().collect())))
}
