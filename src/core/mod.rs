//! Core data structures and primitives
//!
//! Borrowed views over caller-owned memory and the ring buffer used by the
//! streaming trackers.

mod buffer;
mod rolling;

pub use buffer::{NumericBuffer, NumericBufferMut};
pub use rolling::{RollingBuffer, RollingBufferIter};
