use super::{BatchTransform, VolumeTransform};
use crate::{common::*, error::*};

/// Ordered sequence of batch transforms, applied front to back.
#[derive(Debug)]
pub struct Compose {
    transforms: Vec<Box<dyn BatchTransform>>,
}

impl Compose {
    pub fn new(transforms: Vec<Box<dyn BatchTransform>>) -> Self {
        Self { transforms }
    }
}

impl BatchTransform for Compose {
    fn apply(
        &self,
        x: Array4<f32>,
        y: Array4<f32>,
        rng: &mut StdRng,
    ) -> Result<(Array4<f32>, Array4<f32>)> {
        self.transforms
            .iter()
            .try_fold((x, y), |(x, y), transform| transform.apply(x, y, rng))
    }
}

/// Ordered sequence of per-case volume transforms.
#[derive(Debug)]
pub struct VolumeCompose {
    transforms: Vec<Box<dyn VolumeTransform>>,
}

impl VolumeCompose {
    pub fn new(transforms: Vec<Box<dyn VolumeTransform>>) -> Self {
        Self { transforms }
    }
}

impl VolumeTransform for VolumeCompose {
    fn apply(
        &self,
        x: Array4<f32>,
        y: Array4<f32>,
        rng: &mut StdRng,
    ) -> Result<(Array4<f32>, Array4<f32>)> {
        self.transforms
            .iter()
            .try_fold((x, y), |(x, y), transform| transform.apply(x, y, rng))
    }
}
