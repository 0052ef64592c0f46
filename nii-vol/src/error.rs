use crate::common::*;
use thiserror::Error;

pub type Result<T, E = VolumeError> = std::result::Result<T, E>;

/// Errors raised while loading or reshaping case volumes.
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("failed to load volume file {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: nifti::NiftiError,
    },
    #[error("volume file not found: {path}")]
    NotFound { path: PathBuf },
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("invalid volume dimensions: {0}")]
    InvalidDimensions(String),
    #[error("failed to enumerate cases: {0}")]
    Listing(String),
}
