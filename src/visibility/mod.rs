//! Visibility module - Graduated, irreversible immutability controls.
//!
//! | Operation | Object itself    | Own properties                                          |
//! |-----------|------------------|---------------------------------------------------------|
//! | `freeze`  | not extensible   | all: not writable, not configurable                     |
//! | `seal`    | not extensible   | all: not configurable                                   |
//! | `lock`    | unchanged        | currently configurable: not writable, not configurable  |
//! | `hide`    | unchanged        | currently configurable: not enumerable                  |
//!
//! Every operation mutates the object behind the handle and returns the same
//! handle. Scalars pass through untouched. The `_recursive` variants also
//! apply the operation to every own property value, one hop per level, down
//! to an optional depth limit.

mod frozen;
mod hidden;
mod locked;

pub use frozen::*;
pub use hidden::*;
pub use locked::*;

use tracing::trace;

use crate::value::{Object, Value};

/// Applies `apply` to each own value of `target` with one less level of depth.
///
/// Values are collected before the first call, so `apply` may freely mutate
/// `target` again through an alias.
fn descend(target: &Object, depth: Option<usize>, apply: impl Fn(&Value, Option<usize>)) {
    if depth == Some(0) {
        trace!("recursion depth exhausted");
        return;
    }
    let next = depth.map(|d| d - 1);
    for value in target.own_values() {
        apply(&value, next);
    }
}
