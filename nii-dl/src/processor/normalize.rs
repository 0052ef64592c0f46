use super::BatchTransform;
use crate::{common::*, error::*};

/// Normalize image intensities with dataset-level mean and standard
/// deviation. Labels pass through.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanStdNormalize {
    pub mean: f32,
    pub std: f32,
}

impl BatchTransform for MeanStdNormalize {
    fn apply(
        &self,
        mut x: Array4<f32>,
        y: Array4<f32>,
        _rng: &mut StdRng,
    ) -> Result<(Array4<f32>, Array4<f32>)> {
        let Self { mean, std } = *self;
        x.mapv_inplace(|v| (v - mean) / std);
        Ok((x, y))
    }
}
