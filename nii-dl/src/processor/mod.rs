//! Augmentation and normalization transforms applied after batch extraction.

mod brightness;
mod clip;
mod compose;
mod crop;
mod gamma;
mod mirror;
mod normalize;
mod transform;

pub use brightness::*;
pub use clip::*;
pub use compose::*;
pub use crop::*;
pub use gamma::*;
pub use mirror::*;
pub use normalize::*;
pub use transform::*;
