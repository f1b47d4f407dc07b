//! Identity comparison of values.

use crate::value::Value;

/// Returns true if `a` and `b` are the same value.
///
/// Numbers compare by identity rather than numeric equality: `NaN` is the
/// same as `NaN`, while `0.0` and `-0.0` differ. An `Int` is the same as a
/// `Float` holding exactly that integer. Objects and symbols compare by handle.
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => same_float(*x, *y),
        (Value::Int(i), Value::Float(x)) | (Value::Float(x), Value::Int(i)) => int_is_float(*i, *x),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
        _ => false,
    }
}

fn same_float(x: f64, y: f64) -> bool {
    (x.is_nan() && y.is_nan()) || x.to_bits() == y.to_bits()
}

fn int_is_float(i: i64, x: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    // Integers only ever stand for +0.
    x.fract() == 0.0
        && (-LIMIT..LIMIT).contains(&x)
        && x as i64 == i
        && !(x == 0.0 && x.is_sign_negative())
}
