//! Core value types and operations.

use std::fmt;
use std::rc::Rc;

use super::Object;

/// Value is a structured value: a scalar or a handle to a shared object.
///
/// Equality (`==`) is deep structural equality as computed by [`crate::equals`].
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Symbol(Symbol),
    Object(Object),
}

/// Symbol is an opaque token compared by identity.
#[derive(Clone)]
pub struct Symbol(Rc<str>);

impl Symbol {
    /// Creates a new symbol, distinct from every other symbol.
    pub fn new(description: &str) -> Self {
        Symbol(Rc::from(description))
    }

    pub fn description(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Anything that is not an object handle.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Object(_))
    }

    /// Arrays, maps and the other non-callable object kinds.
    pub fn is_composite(&self) -> bool {
        self.as_composite().is_some()
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Object(o) if o.is_function())
    }

    pub fn is_sequence(&self) -> bool {
        self.as_sequence().is_some()
    }

    /// Plain maps without specialized behavior; the only kind merged recursively.
    pub fn is_native_plain_map(&self) -> bool {
        self.as_plain_map().is_some()
    }

    /// Any object handle, functions included.
    pub fn is_composite_or_callable(&self) -> bool {
        self.as_object().is_some()
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Object> {
        self.as_object().filter(|o| o.is_composite())
    }

    pub fn as_sequence(&self) -> Option<&Object> {
        self.as_object().filter(|o| o.is_array())
    }

    pub fn as_plain_map(&self) -> Option<&Object> {
        self.as_object().filter(|o| o.is_plain())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Reads a property of an object handle; `Undefined` for scalars and absent keys.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(o) => o.get(key),
            _ => Value::Undefined,
        }
    }

    /// Copies the reachable graph. Scalars are returned as is.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Object(o) => Value::Object(o.deep_clone()),
            scalar => scalar.clone(),
        }
    }

    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>, ancestors: &mut Vec<usize>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => write!(f, "{:?}", s),
            Value::Object(o) => o.render(f, ancestors),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &mut Vec::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &mut Vec::new())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::compare::equals(self, other)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Object(Object::from_values(values))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_predicates() {
        let map = Value::from(Object::plain());
        let list = Value::from(vec![Value::Int(1)]);
        let date = Value::from(Object::branded("Date"));
        let func = Value::from(Object::function(|_: &[Value]| Value::Undefined));

        assert!(map.is_composite() && map.is_native_plain_map() && !map.is_sequence());
        assert!(list.is_composite() && list.is_sequence() && !list.is_native_plain_map());
        assert!(date.is_composite() && !date.is_native_plain_map());
        assert!(!func.is_composite() && func.is_callable() && func.is_composite_or_callable());

        for scalar in [Value::Undefined, Value::Null, Value::Int(1), Value::from("s")] {
            assert!(scalar.is_scalar());
            assert!(!scalar.is_composite_or_callable());
        }
    }

    #[test]
    fn test_symbols_compare_by_identity() {
        let a = Symbol::new("tag");
        let b = Symbol::new("tag");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.description(), "tag");
    }

    #[test]
    fn test_get_on_scalars_is_undefined() {
        assert!(Value::Int(3).get("x").is_undefined());
        assert!(Value::Null.get("x").is_undefined());
    }

    #[test]
    fn test_display() {
        let map = Object::plain();
        map.set("a", Value::from(vec![Value::Int(1), Value::from("x")]));
        map.set("b", Value::Null);
        assert_eq!(Value::from(map).to_string(), r#"{ a: [1, "x"], b: null }"#);
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Undefined.to_string(), "undefined");
    }
}
