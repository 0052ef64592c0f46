//! Batch composition.

mod slice;
mod volume;

pub use slice::*;
pub use volume::*;
