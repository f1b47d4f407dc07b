//! Freeze and seal.

use tracing::trace;

use super::descend;
use crate::value::{Object, Value};

/// Makes `target` non-extensible and every own property read-only and non-configurable.
///
/// Write-once properties are pinned at their current value.
pub fn freeze(target: &Value) -> &Value {
    if let Some(object) = target.as_object() {
        freeze_object(object);
    }
    target
}

/// Freezes `target` and, down to `depth` levels (`None` for no limit), every value it holds.
///
/// An already frozen object is returned immediately without visiting its
/// values, so self-referencing graphs terminate.
pub fn freeze_recursive(target: &Value, depth: Option<usize>) -> &Value {
    let Some(object) = target.as_object() else {
        return target;
    };
    if object_is_frozen(object) {
        trace!("already frozen, not descending");
        return target;
    }
    freeze_object(object);
    descend(object, depth, |value, depth| {
        freeze_recursive(value, depth);
    });
    target
}

/// Makes `target` non-extensible and every own property non-configurable.
pub fn seal(target: &Value) -> &Value {
    if let Some(object) = target.as_object() {
        seal_object(object);
    }
    target
}

/// Seals `target` and, down to `depth` levels (`None` for no limit), every value it holds.
///
/// An already sealed object is returned immediately without visiting its
/// values, so self-referencing graphs terminate.
pub fn seal_recursive(target: &Value, depth: Option<usize>) -> &Value {
    let Some(object) = target.as_object() else {
        return target;
    };
    if object_is_sealed(object) {
        trace!("already sealed, not descending");
        return target;
    }
    seal_object(object);
    descend(object, depth, |value, depth| {
        seal_recursive(value, depth);
    });
    target
}

/// Returns true if nothing about `target` can change any more. Scalars are frozen.
pub fn is_frozen(target: &Value) -> bool {
    target.as_object().map_or(true, object_is_frozen)
}

/// Returns true if `target` can neither gain nor lose properties. Scalars are sealed.
pub fn is_sealed(target: &Value) -> bool {
    target.as_object().map_or(true, object_is_sealed)
}

/// Returns true if new properties can be added to `target`.
pub fn is_extensible(target: &Value) -> bool {
    target.as_object().is_some_and(Object::is_extensible)
}

fn freeze_object(object: &Object) {
    object.prevent_extensions();
    object.update_properties(|property| {
        property.make_read_only();
        property.make_non_configurable();
    });
}

fn seal_object(object: &Object) {
    object.prevent_extensions();
    object.update_properties(|property| property.make_non_configurable());
}

fn object_is_frozen(object: &Object) -> bool {
    !object.is_extensible()
        && object.all_properties(|p| !p.is_configurable() && !p.is_writable())
}

fn object_is_sealed(object: &Object) -> bool {
    !object.is_extensible() && object.all_properties(|p| !p.is_configurable())
}
