//! Recursive structural predicates.

use std::collections::BTreeSet;

use super::same_value;
use crate::value::{Object, Value};

/// Returns true if `subject` contains everything the pattern `target` specifies.
///
/// Arrays must have equal length and match element-wise; a hole in the
/// pattern matches anything at that index. Any other pair of
/// composites is compared key-wise over the pattern's enumerable keys, so keys
/// only present in `subject` are ignored. A pattern key holding `Undefined`
/// requires the subject's key to be absent or `Undefined`.
///
/// Only identical handles short-circuit, so two distinct cyclic graphs recurse
/// without bound.
pub fn matches(subject: &Value, target: &Value) -> bool {
    if same_value(subject, target) {
        return true;
    }
    let (Some(s), Some(t)) = (subject.as_composite(), target.as_composite()) else {
        return false;
    };
    if s.is_array() && t.is_array() {
        return s.len() == t.len()
            && t.indices()
                .into_iter()
                .all(|i| matches(&s.get_index(i), &t.get_index(i)));
    }
    t.entries()
        .iter()
        .all(|(key, value)| matches(&s.get(key), value))
}

/// Returns true if `subject` and `target` are deeply equal.
///
/// Arrays compare element-wise, a hole reading as `Undefined` on either
/// side, so a hole equals an explicit `Undefined`. Other composites must have the same set of
/// enumerable keys with deeply equal values; key order does not matter.
/// Hidden properties and property flags are not compared.
pub fn equals(subject: &Value, target: &Value) -> bool {
    if same_value(subject, target) {
        return true;
    }
    let (Some(s), Some(t)) = (subject.as_composite(), target.as_composite()) else {
        return false;
    };
    if s.is_array() && t.is_array() {
        return s.len() == t.len()
            && present_indices(s, t)
                .into_iter()
                .all(|i| equals(&s.get_index(i), &t.get_index(i)));
    }
    let (s_keys, t_keys) = (sorted_keys(s), sorted_keys(t));
    s_keys == t_keys && s_keys.iter().all(|key| equals(&s.get(key), &t.get(key)))
}

/// Indices present in either array. Positions absent from both are holes on both sides.
fn present_indices(s: &Object, t: &Object) -> BTreeSet<usize> {
    s.indices().into_iter().chain(t.indices()).collect()
}

fn sorted_keys(object: &Object) -> Vec<String> {
    let mut keys = object.keys();
    keys.sort_unstable();
    keys
}
