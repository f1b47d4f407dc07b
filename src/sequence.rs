//! Coercion of arbitrary values into arrays.

use tracing::trace;

use crate::value::{Iteration, Object, Value};
use crate::visibility::freeze;

/// Coerces `value` into an array value.
///
/// - `Undefined` and `Null` become an empty array.
/// - Scalars become a one-element array.
/// - An array is returned as the same handle, not a copy.
/// - Iterable composites are drained through their iteration capability.
/// - Pull iterators are drained until a step reports `done`. An iterator that
///   never finishes makes this call run forever.
/// - Any other object becomes a one-element array wrapping it.
pub fn array(value: &Value) -> Value {
    let object = match value {
        Value::Undefined | Value::Null => return Value::Object(Object::array()),
        Value::Object(object) => object,
        scalar => return Value::from(vec![scalar.clone()]),
    };
    if object.is_array() {
        return value.clone();
    }
    match object.iteration() {
        Some(Iteration::Sequential(source)) => Value::Object(Object::from_values(source.iterate())),
        Some(Iteration::Pull(source)) => {
            let mut items = Vec::new();
            loop {
                let step = source.borrow_mut().next();
                if step.done {
                    break;
                }
                items.push(step.value);
            }
            trace!(count = items.len(), "drained pull iterator");
            Value::Object(Object::from_values(items))
        }
        None => Value::from(vec![value.clone()]),
    }
}

/// Like [`array`], but the result is frozen.
///
/// When `value` already is an array, a shallow copy is frozen so the caller's
/// array stays writable.
pub fn array_freeze(value: &Value) -> Value {
    let result = match (value, array(value)) {
        (Value::Object(input), Value::Object(output)) if input.ptr_eq(&output) => {
            Value::Object(output.shallow_copy())
        }
        (_, output) => output,
    };
    freeze(&result);
    result
}
