//! Deep merge of plain maps.

use tracing::trace;

use crate::value::{Object, Value};

/// Deep-merges each source into `target`, left to right, and returns `target`.
///
/// Values that are native plain maps merge recursively into the matching
/// slot of `target`, which is replaced by a fresh map first if it holds
/// anything else. Every other value, arrays included, replaces the slot
/// wholesale. Writes go through [`Object::set`], so read-only slots keep
/// their value and write-once slots take only their first write.
///
/// A `target` that is not an object is returned untouched; sources that are
/// not composites are skipped. Sources are read before each write, so a source
/// may alias `target`. A source map that contains itself recurses without bound.
pub fn extend<'a>(target: &'a Value, sources: &[Value]) -> &'a Value {
    let Some(object) = target.as_object() else {
        trace!("extend target is not an object, nothing merged");
        return target;
    };
    for source in sources {
        extend_object(object, source);
    }
    target
}

/// Deep-merges `sources` into a new plain map.
pub fn combine(sources: &[Value]) -> Value {
    let target = Value::Object(Object::plain());
    extend(&target, sources);
    target
}

fn extend_object(target: &Object, source: &Value) {
    let Some(source) = source.as_composite() else {
        trace!("skipping non-composite merge source");
        return;
    };
    for (key, value) in source.entries() {
        let merged = if value.is_native_plain_map() {
            let slot = match target.get(&key) {
                Value::Object(existing) if existing.is_plain() => existing,
                _ => Object::plain(),
            };
            extend_object(&slot, &value);
            Value::Object(slot)
        } else {
            value
        };
        if !target.set(&key, merged) {
            trace!(key = %key, "merge write absorbed by read-only target slot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::json;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extend_returns_target() {
        let target = json(r#"{"a":1}"#);
        let result = extend(&target, &[json(r#"{"b":2}"#)]);
        match (result, &target) {
            (Value::Object(r), Value::Object(t)) => assert!(r.ptr_eq(t)),
            _ => panic!("extend lost the target handle"),
        }
        assert_eq!(target, json(r#"{"a":1,"b":2}"#));
    }

    #[test]
    fn test_extend_scalar_target_is_untouched() {
        let target = Value::Int(5);
        assert_eq!(extend(&target, &[json(r#"{"a":1}"#)]), &Value::Int(5));
        assert!(extend(&Value::Undefined, &[json("{}")]).is_undefined());
    }

    #[test]
    fn test_extend_skips_non_composite_sources() {
        let target = json(r#"{"a":1}"#);
        extend(&target, &[Value::Int(1), Value::from("bc"), Value::Null, json(r#"{"b":2}"#)]);
        assert_eq!(target, json(r#"{"a":1,"b":2}"#));
    }

    #[test]
    fn test_extend_into_function_properties() {
        let f = Value::from(Object::function(|_: &[Value]| Value::Null));
        extend(&f, &[json(r#"{"name":"f"}"#)]);
        assert_eq!(f.get("name"), Value::from("f"));
    }

    #[test]
    fn test_source_maps_are_copied_not_aliased() {
        let source = json(r#"{"nested":{"x":1}}"#);
        let target = json("{}");
        extend(&target, &[source.clone()]);
        match (target.get("nested"), source.get("nested")) {
            (Value::Object(t), Value::Object(s)) => assert!(!t.ptr_eq(&s)),
            _ => panic!("nested map missing"),
        }
        extend(&target, &[json(r#"{"nested":{"y":2}}"#)]);
        assert_eq!(source, json(r#"{"nested":{"x":1}}"#));
    }

    #[test]
    fn test_extend_self_alias() {
        let target = json(r#"{"a":{"b":1},"c":[1]}"#);
        extend(&target, &[target.clone()]);
        assert_eq!(target, json(r#"{"a":{"b":1},"c":[1]}"#));
    }

    #[test]
    fn test_combine_leaves_sources_alone() {
        let a = json(r#"{"x":{"y":1}}"#);
        let b = json(r#"{"x":{"z":2}}"#);
        let merged = combine(&[a.clone(), b.clone()]);
        assert_eq!(merged, json(r#"{"x":{"y":1,"z":2}}"#));
        assert_eq!(a, json(r#"{"x":{"y":1}}"#));
        assert_eq!(b, json(r#"{"x":{"z":2}}"#));
    }

    #[test]
    fn test_combine_nothing() {
        assert_eq!(combine(&[]), json("{}"));
    }
}
