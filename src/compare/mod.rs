//! Compare module - Structural comparison of values.
//!
//! `equals` is symmetric deep equality; `matches` treats its second argument
//! as a pattern the first must contain. Both are pure.

mod identity;
mod structural;

#[cfg(test)]
mod properties_test;

pub use identity::same_value;
pub use structural::{equals, matches};
