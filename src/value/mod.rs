//! Value module - In-memory representation of structured values.
//!
//! Scalars are held inline; arrays, maps and functions are shared object
//! handles whose properties carry writable/configurable/enumerable flags.

mod json;
mod object;
mod value;
mod write_once;

pub use json::*;
pub use object::{Callable, Iterable, Object, ObjectKind, PropertyFlags, PullIterator, Step};
pub(crate) use object::{Iteration, Property};
pub use value::*;
pub use write_once::WriteOnce;
