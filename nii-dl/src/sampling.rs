//! Sampling mode classification and slice selection policies.

use crate::{common::*, error::*};

/// How a batch is composed, fixed at generator construction from
/// `(n_pos, batch_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Every case uses random slice sampling.
    Random,
    /// Every case uses positive slice sampling.
    Positive,
    /// The first `n_pos` cases are positively sampled, the rest randomly;
    /// the composed batch is shuffled before return.
    Balanced { n_pos: usize },
}

impl SamplingMode {
    pub fn classify(n_pos: usize, batch_size: usize) -> Result<Self> {
        if n_pos > batch_size {
            return Err(GeneratorError::InvalidConfig(format!(
                "n_pos ({n_pos}) cannot exceed batch_size ({batch_size})"
            )));
        }
        let mode = if n_pos == 0 {
            warn!("n_pos is 0; every slice in every batch is sampled randomly");
            SamplingMode::Random
        } else if n_pos == batch_size {
            warn!("n_pos equals batch_size; every slice is positively sampled");
            SamplingMode::Positive
        } else {
            SamplingMode::Balanced { n_pos }
        };
        Ok(mode)
    }
}

/// Per-case slice selection policy within one sub-batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlicePolicy {
    Positive,
    Random,
}

/// First index along the primary axis whose slice contains foreground.
/// Returns `None` for an all-background mask (a degenerate case).
pub fn positive_slice_index(mask: &Array3<u8>) -> Option<usize> {
    mask.axis_iter(Axis(0))
        .position(|slice| slice.iter().any(|&v| v != 0))
}

/// Uniformly random index along a primary axis of length `len`.
pub fn random_slice_index<R>(len: usize, rng: &mut R) -> usize
where
    R: Rng,
{
    rng.gen_range(0..len)
}
