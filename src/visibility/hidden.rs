//! Hide: remove properties from enumeration.

use tracing::trace;

use super::descend;
use crate::value::{Property, Value};

/// Makes every currently configurable own property non-enumerable.
///
/// Hidden properties can still be read and written, but `keys`, `entries`,
/// comparison, merging and serialization no longer see them.
pub fn hide(target: &Value) -> &Value {
    if let Some(object) = target.as_object() {
        object.update_properties(hide_property);
    }
    target
}

/// Hides `target` and, down to `depth` levels (`None` for no limit), every value it holds.
///
/// There is no already-hidden check, so a cyclic graph needs a finite `depth`.
pub fn hide_recursive(target: &Value, depth: Option<usize>) -> &Value {
    let Some(object) = target.as_object() else {
        return target;
    };
    object.update_properties(hide_property);
    descend(object, depth, |value, depth| {
        hide_recursive(value, depth);
    });
    target
}

/// Hides only the named own properties. Absent keys are skipped.
pub fn hide_props<'a>(target: &'a Value, keys: &[&str]) -> &'a Value {
    if let Some(object) = target.as_object() {
        for key in keys {
            if !object.update_property(key, hide_property) {
                trace!(key, "no such property to hide");
            }
        }
    }
    target
}

fn hide_property(property: &mut Property) {
    if property.is_configurable() {
        property.make_hidden();
    }
}
