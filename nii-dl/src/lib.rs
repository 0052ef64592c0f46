//! Stochastic batch generation for 2D and 3D CT segmentation training.

mod common;
pub mod config;
pub mod error;
pub mod generator;
pub mod label;
pub mod processor;
pub mod sampling;
pub mod scheduler;

pub use config::*;
pub use error::*;
pub use generator::*;
pub use label::*;
pub use processor::*;
pub use sampling::*;
pub use scheduler::*;
