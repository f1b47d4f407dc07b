//! Lock: per-property read-only, plus write-once defaults.

use tracing::trace;

use super::descend;
use crate::value::{Object, Property, Value};

/// Makes every currently configurable own property read-only and non-configurable.
///
/// Unlike [`crate::freeze`], `target` stays extensible and properties that are
/// already non-configurable are left as they are.
pub fn lock(target: &Value) -> &Value {
    if let Some(object) = target.as_object() {
        object.update_properties(lock_property);
    }
    target
}

/// Locks `target` and, down to `depth` levels (`None` for no limit), every value it holds.
///
/// There is no already-locked check, so a cyclic graph needs a finite `depth`.
pub fn lock_recursive(target: &Value, depth: Option<usize>) -> &Value {
    let Some(object) = target.as_object() else {
        return target;
    };
    object.update_properties(lock_property);
    descend(object, depth, |value, depth| {
        lock_recursive(value, depth);
    });
    target
}

/// Locks only the named own properties. Absent keys are skipped.
pub fn lock_props<'a>(target: &'a Value, keys: &[&str]) -> &'a Value {
    if let Some(object) = target.as_object() {
        for key in keys {
            if !object.update_property(key, lock_property) {
                trace!(key, "no such property to lock");
            }
        }
    }
    target
}

/// Turns each named property into a write-once slot.
///
/// The slot reads as its current value until the first assignment, which is
/// kept; every later assignment is ignored. Keys that are not own properties
/// yet are added as write-once slots reading `Undefined` if `target` is
/// extensible. Non-configurable properties are skipped.
pub fn lock_defaults<'a>(target: &'a Value, keys: &[&str]) -> &'a Value {
    let Some(object) = target.as_object() else {
        return target;
    };
    for key in keys {
        install_default(object, key);
    }
    target
}

fn install_default(object: &Object, key: &str) {
    let found = object.update_property(key, |property| {
        if property.is_configurable() {
            property.make_write_once();
        } else {
            trace!(key, "property is not configurable, default not installed");
        }
    });
    if !found && !object.install(key, Property::write_once(Value::Undefined)) {
        trace!(key, "object is not extensible, default not installed");
    }
}

fn lock_property(property: &mut Property) {
    if property.is_configurable() {
        property.make_read_only();
        property.make_non_configurable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::json;
    use crate::value::PropertyFlags;
    use crate::visibility::{is_extensible, is_frozen};
    use pretty_assertions::assert_eq;

    fn object(value: &Value) -> &Object {
        value.as_object().expect("expected an object")
    }

    #[test]
    fn test_lock_keeps_object_extensible() {
        let target = json(r#"{"a":1}"#);
        lock(&target);
        let o = object(&target);
        assert!(!o.set("a", Value::Int(2)));
        assert!(!o.delete("a"));
        assert!(is_extensible(&target));
        assert!(o.set("b", Value::Int(2)));
        assert!(o.set("b", Value::Int(3)));
        assert_eq!(target, json(r#"{"a":1,"b":3}"#));
    }

    #[test]
    fn test_lock_skips_non_configurable_properties() {
        let o = Object::plain();
        o.define("sealed", Value::Int(1), PropertyFlags::WRITABLE | PropertyFlags::ENUMERABLE);
        let target = Value::from(o.clone());
        lock(&target);
        assert!(o.set("sealed", Value::Int(2)));
        assert_eq!(o.get("sealed"), Value::Int(2));
    }

    #[test]
    fn test_lock_recursive_with_depth() {
        let target = json(r#"{"a":{"b":{"c":1}}}"#);
        lock_recursive(&target, Some(1));
        assert!(!object(&target.get("a")).set("b", Value::Null));
        assert!(object(&target.get("a").get("b")).set("c", Value::Int(2)));
    }

    #[test]
    fn test_lock_recursive_cycle_with_finite_depth() {
        let root = Object::plain();
        root.set("me", Value::from(root.clone()));
        root.set("n", Value::Int(1));
        let root = Value::from(root);
        lock_recursive(&root, Some(8));
        assert!(!object(&root).set("n", Value::Int(2)));
    }

    #[test]
    fn test_lock_props_only_touches_named_keys() {
        let target = json(r#"{"a":1,"b":2}"#);
        lock_props(&target, &["a", "missing"]);
        let o = object(&target);
        assert!(!o.set("a", Value::Int(9)));
        assert!(o.set("b", Value::Int(9)));
        assert!(!o.has_own("missing"));
    }

    #[test]
    fn test_lock_array_elements() {
        let target = json("[1,2]");
        lock_props(&target, &["0"]);
        let o = object(&target);
        assert!(!o.set("0", Value::Int(9)));
        assert!(o.set("1", Value::Int(9)));
        assert_eq!(target, json("[1,9]"));
    }

    #[test]
    fn test_lock_defaults_first_write_wins() {
        let target = json(r#"{"k":"default"}"#);
        lock_defaults(&target, &["k"]);
        let o = object(&target);
        assert_eq!(o.get("k"), Value::from("default"));
        assert!(o.set("k", Value::from("first")));
        assert_eq!(o.get("k"), Value::from("first"));
        assert!(!o.set("k", Value::from("second")));
        assert_eq!(o.get("k"), Value::from("first"));
        assert!(!o.delete("k"));
    }

    #[test]
    fn test_lock_defaults_new_key() {
        let target = json("{}");
        lock_defaults(&target, &["k"]);
        let o = object(&target);
        assert!(o.has_own("k"));
        assert!(o.get("k").is_undefined());
        assert!(o.set("k", Value::Int(1)));
        assert!(!o.set("k", Value::Int(2)));
        assert_eq!(target, json(r#"{"k":1}"#));
    }

    #[test]
    fn test_lock_defaults_skips_locked_properties() {
        let target = json(r#"{"k":1}"#);
        lock(&target);
        lock_defaults(&target, &["k"]);
        assert!(!object(&target).set("k", Value::Int(2)));
        assert_eq!(target.get("k"), Value::Int(1));
    }

    #[test]
    fn test_lock_defaults_on_frozen_object() {
        let target = json("{}");
        crate::visibility::freeze(&target);
        lock_defaults(&target, &["k"]);
        assert!(!object(&target).has_own("k"));
        assert!(is_frozen(&target));
    }

    #[test]
    fn test_lock_defaults_feeds_extend() {
        let target = json(r#"{"mode":"auto"}"#);
        lock_defaults(&target, &["mode"]);
        crate::merge::extend(&target, &[json(r#"{"mode":"manual"}"#), json(r#"{"mode":"off"}"#)]);
        assert_eq!(target.get("mode"), Value::from("manual"));
    }
}
