//! Merge module - Deep merge and residual computation over plain maps.
//!
//! Both operations mutate their first argument in place and hand it back.
//! Only native plain maps are merged key by key; every other value is atomic.

mod deep_merge;
mod residual;


pub use deep_merge::*;
pub use residual::*;
