//! # Structured Objects
//!
//! Deep structural comparison, merge/diff and immutability controls for
//! nested object values.
//!
//! Values are scalars or shared handles to arrays, plain maps, branded
//! composites and functions. Handles alias: cloning a [`Value`] never copies
//! the object behind it, and every mutating operation here works in place on
//! the handle it is given and returns it. Clone with [`Value::deep_clone`]
//! first when the original must survive.
//!
//! ## Modules
//!
//! - [`value`] - The value model, property flags and JSON/YAML bridging
//! - [`compare`] - Structural equality and pattern matching
//! - [`merge`] - Deep merge (`extend`, `combine`) and residuals (`reduce`)
//! - [`sequence`] - Coercion of any value into an array
//! - [`visibility`] - `freeze`, `seal`, `lock`, `hide` and their variants
//!
//! ```
//! use structured_objects::{combine, equals, reduce, value::from_json};
//!
//! let base = from_json(r#"{"a":1,"b":{"c":2}}"#).unwrap();
//! let over = from_json(r#"{"b":{"c":3}}"#).unwrap();
//! let merged = combine(&[base.clone(), over.clone()]);
//! assert!(equals(&merged, &from_json(r#"{"a":1,"b":{"c":3}}"#).unwrap()));
//!
//! let residual = merged.deep_clone();
//! reduce(&residual, &[base]);
//! assert_eq!(residual, over);
//! ```

pub mod compare;
pub mod error;
pub mod merge;
pub mod sequence;
pub mod value;
pub mod visibility;

#[cfg(test)]
mod testing;

pub use compare::{equals, matches, same_value};
pub use error::{Error, Result};
pub use merge::{combine, extend, reduce};
pub use sequence::{array, array_freeze};
pub use value::{Object, ObjectKind, PropertyFlags, Step, Symbol, Value, WriteOnce};
pub use visibility::{
    freeze, freeze_recursive, hide, hide_props, hide_recursive, is_extensible, is_frozen,
    is_sealed, lock, lock_defaults, lock_props, lock_recursive, seal, seal_recursive,
};
