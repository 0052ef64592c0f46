use super::VolumeTransform;
use crate::{common::*, error::*};
use nii_vol::random_crop_pair;

/// Cut a channel-first volume pair to a fixed spatial patch at a shared
/// random offset. This is the transform that makes heterogeneous cases
/// stackable on the volumetric path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomCrop3d {
    pub patch: (usize, usize, usize),
}

impl VolumeTransform for RandomCrop3d {
    fn apply(
        &self,
        x: Array4<f32>,
        y: Array4<f32>,
        rng: &mut StdRng,
    ) -> Result<(Array4<f32>, Array4<f32>)> {
        let (x, y) = random_crop_pair(&x, &y, self.patch, rng)?;
        Ok((x, y))
    }
}
