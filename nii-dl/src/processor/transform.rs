use crate::{common::*, error::*};

/// A transform over a 2D batch pair, channel-last `(N, H, W, C)`.
///
/// Implementations must preserve the leading batch dimension; the generator
/// verifies the contract after the whole pipeline has run.
pub trait BatchTransform
where
    Self: Debug + Send + Sync,
{
    fn apply(
        &self,
        x: Array4<f32>,
        y: Array4<f32>,
        rng: &mut StdRng,
    ) -> Result<(Array4<f32>, Array4<f32>)>;
}

/// A per-case transform over a channel-first volume pair `(C, Z, Y, X)`.
///
/// The volumetric path applies these before stacking, so a transform that
/// cuts every case to a common patch shape is what makes heterogeneous
/// cases batchable.
pub trait VolumeTransform
where
    Self: Debug + Send + Sync,
{
    fn apply(
        &self,
        x: Array4<f32>,
        y: Array4<f32>,
        rng: &mut StdRng,
    ) -> Result<(Array4<f32>, Array4<f32>)>;
}
