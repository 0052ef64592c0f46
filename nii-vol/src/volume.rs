//! The paired image/mask volume of a single case.

use crate::{common::*, error::*};

/// One patient case: a CT image volume and its segmentation mask, both laid
/// out `(Z, Y, X)` with the slicing axis first. The pair is immutable once
/// loaded and is re-read from storage on every access.
#[derive(Debug, Clone)]
pub struct Case {
    image: Array3<f32>,
    mask: Array3<u8>,
}

impl Case {
    pub fn new(image: Array3<f32>, mask: Array3<u8>) -> Result<Self> {
        if image.dim() != mask.dim() {
            return Err(VolumeError::ShapeMismatch {
                expected: image.shape().to_vec(),
                found: mask.shape().to_vec(),
            });
        }
        if image.shape().iter().any(|&d| d == 0) {
            return Err(VolumeError::InvalidDimensions(format!(
                "volume has a zero-sized dimension: {:?}",
                image.shape()
            )));
        }
        Ok(Self { image, mask })
    }

    pub fn image(&self) -> &Array3<f32> {
        &self.image
    }

    pub fn mask(&self) -> &Array3<u8> {
        &self.mask
    }

    /// Number of 2D slices along the primary axis.
    pub fn num_slices(&self) -> usize {
        self.image.len_of(Axis(0))
    }

    /// Extract the `z`-th image/mask slice pair.
    ///
    /// Panics when `z` is out of bounds; callers obtain `z` from a slice
    /// selection policy that is bounded by `num_slices()`.
    pub fn slice_pair(&self, z: usize) -> (Array2<f32>, Array2<u8>) {
        (
            self.image.index_axis(Axis(0), z).to_owned(),
            self.mask.index_axis(Axis(0), z).to_owned(),
        )
    }

    /// The image volume with an explicit leading channel axis, `(1, Z, Y, X)`.
    /// This is the channel-first layout the volumetric path feeds to the
    /// transform pipeline.
    pub fn image_channels_first(&self) -> Array4<f32> {
        let (z, y, x) = self.image.dim();
        self.image
            .clone()
            .into_shape((1, z, y, x))
            .expect("channel axis insertion cannot change the element count")
    }
}

/// Append a trailing channel axis to a 2D slice, `(H, W)` -> `(H, W, 1)`.
/// The 2D path is channel-last.
pub fn to_channels_last(slice: Array2<f32>) -> Array3<f32> {
    let (h, w) = slice.dim();
    slice
        .into_shape((h, w, 1))
        .expect("channel axis insertion cannot change the element count")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_rejects_mismatched_pair() {
        let image = Array3::<f32>::zeros((4, 8, 8));
        let mask = Array3::<u8>::zeros((4, 8, 9));
        assert!(matches!(
            Case::new(image, mask),
            Err(VolumeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn case_rejects_zero_sized_dimensions() {
        let image = Array3::<f32>::zeros((0, 8, 8));
        let mask = Array3::<u8>::zeros((0, 8, 8));
        assert!(matches!(
            Case::new(image, mask),
            Err(VolumeError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn slice_pair_extracts_along_primary_axis() {
        let mut image = Array3::<f32>::zeros((3, 2, 2));
        image[[1, 0, 0]] = 7.0;
        let mask = Array3::<u8>::zeros((3, 2, 2));
        let case = Case::new(image, mask).unwrap();

        let (img, _) = case.slice_pair(1);
        assert_eq!(img.dim(), (2, 2));
        assert_eq!(img[[0, 0]], 7.0);
    }

    #[test]
    fn channel_layout_helpers() {
        let case = Case::new(Array3::zeros((3, 4, 5)), Array3::zeros((3, 4, 5))).unwrap();
        assert_eq!(case.image_channels_first().dim(), (1, 3, 4, 5));

        let slice = Array2::<f32>::zeros((4, 5));
        assert_eq!(to_channels_last(slice).dim(), (4, 5, 1));
    }
}
