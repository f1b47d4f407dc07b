//! Residual of a value against a set of bases.

use tracing::trace;

use crate::compare::equals;
use crate::value::{Object, Value};

/// Removes from `target`, in place, everything the sources already provide,
/// and returns `target`.
///
/// For each source key, a target key holding a deeply equal value is deleted.
/// Where both sides hold native plain maps, the nested map is reduced
/// recursively instead. Re-applying the residual over the same sources
/// rebuilds the original override:
/// `extend(combine(sources), reduce(t, sources))` equals `extend(combine(sources), t)`.
///
/// A `target` that is not a composite is returned untouched; sources that are
/// not composites are skipped. Non-configurable target keys are kept.
pub fn reduce<'a>(target: &'a Value, sources: &[Value]) -> &'a Value {
    let Some(object) = target.as_composite() else {
        trace!("reduce target is not a composite, nothing removed");
        return target;
    };
    for source in sources {
        reduce_object(object, source);
    }
    target
}

fn reduce_object(target: &Object, source: &Value) {
    let Some(source) = source.as_composite() else {
        trace!("skipping non-composite reduce source");
        return;
    };
    for (key, base) in source.entries() {
        let current = target.get(&key);
        if equals(&current, &base) {
            target.delete(&key);
        } else if let (Some(nested), Some(_)) = (current.as_plain_map(), base.as_plain_map()) {
            reduce_object(nested, &base);
        }
    }
}
