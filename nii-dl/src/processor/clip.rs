use super::BatchTransform;
use crate::{common::*, error::*};

/// Clamp image intensities to a fixed Hounsfield window. Labels pass through.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipValueRange {
    pub min: f32,
    pub max: f32,
}

impl BatchTransform for ClipValueRange {
    fn apply(
        &self,
        mut x: Array4<f32>,
        y: Array4<f32>,
        _rng: &mut StdRng,
    ) -> Result<(Array4<f32>, Array4<f32>)> {
        let Self { min, max } = *self;
        x.mapv_inplace(|v| v.clamp(min, max));
        Ok((x, y))
    }
}
