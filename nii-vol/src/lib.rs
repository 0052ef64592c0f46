//! Paired CT image/segmentation volumes and the array-level operations the
//! batch generation engine builds on.

mod common;
mod crop;
mod error;
mod resize;
mod source;
mod volume;

pub use crop::*;
pub use error::*;
pub use resize::*;
pub use source::*;
pub use volume::*;
