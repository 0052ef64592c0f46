use thiserror::Error;

pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;

/// Errors that abort a batch fetch. None of these are retried internally;
/// skip/resample policy belongs to the caller.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Volume(#[from] nii_vol::VolumeError),
    #[error("case {case_id} has no slice with foreground voxels")]
    NoPositiveSlice { case_id: String },
    #[error("batch size contract violated: expected {expected}, found {found}")]
    BatchSizeMismatch { expected: usize, found: usize },
    #[error("cases in a batch have incompatible shapes: {0}")]
    Stack(#[from] ndarray::ShapeError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),
    #[error("failed to parse configuration file: {0}")]
    ConfigParse(#[from] json5::Error),
}
