//! Random 3D cropping for the volumetric path. Cropping to a common patch
//! shape is how heterogeneous cases become stackable into one batch.

use crate::{common::*, error::*};
use rand::Rng;

/// Crop a channel-first `(C, Z, Y, X)` image/label pair to the given spatial
/// patch at a shared random offset. Both sides are cut identically so the
/// voxel correspondence is preserved.
pub fn random_crop_pair<R>(
    x: &Array4<f32>,
    y: &Array4<f32>,
    patch: (usize, usize, usize),
    rng: &mut R,
) -> Result<(Array4<f32>, Array4<f32>)>
where
    R: Rng,
{
    let (_, in_z, in_y, in_x) = x.dim();
    let (pz, py, px) = patch;

    if x.shape()[1..] != y.shape()[1..] {
        return Err(VolumeError::ShapeMismatch {
            expected: x.shape().to_vec(),
            found: y.shape().to_vec(),
        });
    }
    if pz > in_z || py > in_y || px > in_x {
        return Err(VolumeError::InvalidDimensions(format!(
            "crop patch {patch:?} exceeds volume spatial shape ({in_z}, {in_y}, {in_x})"
        )));
    }

    let oz = rng.gen_range(0..=in_z - pz);
    let oy = rng.gen_range(0..=in_y - py);
    let ox = rng.gen_range(0..=in_x - px);

    let x_out = x
        .slice(s![.., oz..oz + pz, oy..oy + py, ox..ox + px])
        .to_owned();
    let y_out = y
        .slice(s![.., oz..oz + pz, oy..oy + py, ox..ox + px])
        .to_owned();
    Ok((x_out, y_out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn crop_produces_patch_shape() {
        let x = Array4::<f32>::zeros((1, 10, 20, 20));
        let y = Array4::<f32>::zeros((2, 10, 20, 20));
        let mut rng = StdRng::seed_from_u64(3);

        let (cx, cy) = random_crop_pair(&x, &y, (4, 8, 8), &mut rng).unwrap();
        assert_eq!(cx.dim(), (1, 4, 8, 8));
        assert_eq!(cy.dim(), (2, 4, 8, 8));
    }

    #[test]
    fn oversized_patch_is_rejected() {
        let x = Array4::<f32>::zeros((1, 4, 4, 4));
        let y = x.clone();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(random_crop_pair(&x, &y, (8, 4, 4), &mut rng).is_err());
    }

    #[test]
    fn both_sides_share_the_offset() {
        let mut x = Array4::<f32>::zeros((1, 6, 6, 6));
        let mut y = Array4::<f32>::zeros((1, 6, 6, 6));
        for z in 0..6 {
            for yy in 0..6 {
                for xx in 0..6 {
                    let tag = (z * 100 + yy * 10 + xx) as f32;
                    x[[0, z, yy, xx]] = tag;
                    y[[0, z, yy, xx]] = tag;
                }
            }
        }
        let mut rng = StdRng::seed_from_u64(11);
        let (cx, cy) = random_crop_pair(&x, &y, (2, 3, 3), &mut rng).unwrap();
        assert_eq!(cx, cy);
    }
}
