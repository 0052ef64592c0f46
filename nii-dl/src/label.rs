//! Integer mask to per-class binary channel expansion.

use crate::common::*;

/// Expand an integer-labeled 2D mask into channel-last binary indicator
/// channels, `(H, W)` -> `(H, W, label_channels)`.
///
/// A binary task (`n_classes == 1`) is passed through unexpanded: the single
/// channel carries the mask as floats. With background retained every pixel
/// belongs to exactly one channel; with `remove_background` the channel for
/// label 0 is dropped and background pixels are all-zero across channels.
pub fn expand_labels(mask: &Array2<u8>, n_classes: usize, remove_background: bool) -> Array3<f32> {
    let (h, w) = mask.dim();

    if n_classes == 1 {
        let mut out = Array3::<f32>::zeros((h, w, 1));
        for ((y, x), &label) in mask.indexed_iter() {
            out[[y, x, 0]] = label as f32;
        }
        return out;
    }

    let offset = usize::from(remove_background);
    let channels = n_classes - offset;
    let mut out = Array3::<f32>::zeros((h, w, channels));
    for ((y, x), &label) in mask.indexed_iter() {
        let label = label as usize;
        if label < offset || label >= n_classes {
            continue;
        }
        out[[y, x, label - offset]] = 1.0;
    }
    out
}

/// Channel-first 3D counterpart for the volumetric path,
/// `(Z, Y, X)` -> `(label_channels, Z, Y, X)`.
pub fn expand_labels_3d(
    mask: &Array3<u8>,
    n_classes: usize,
    remove_background: bool,
) -> Array4<f32> {
    let (z, y, x) = mask.dim();

    if n_classes == 1 {
        let mut out = Array4::<f32>::zeros((1, z, y, x));
        for ((zi, yi, xi), &label) in mask.indexed_iter() {
            out[[0, zi, yi, xi]] = label as f32;
        }
        return out;
    }

    let offset = usize::from(remove_background);
    let channels = n_classes - offset;
    let mut out = Array4::<f32>::zeros((channels, z, y, x));
    for ((zi, yi, xi), &label) in mask.indexed_iter() {
        let label = label as usize;
        if label < offset || label >= n_classes {
            continue;
        }
        out[[label - offset, zi, yi, xi]] = 1.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_task_passes_mask_through() {
        let mut mask = Array2::<u8>::zeros((2, 2));
        mask[[0, 1]] = 1;
        let out = expand_labels(&mask, 1, false);
        assert_eq!(out.dim(), (2, 2, 1));
        assert_eq!(out[[0, 1, 0]], 1.0);
        assert_eq!(out[[0, 0, 0]], 0.0);
    }

    #[test]
    fn one_hot_channels_sum_to_one() {
        let mut mask = Array2::<u8>::zeros((3, 3));
        mask[[0, 0]] = 1;
        mask[[1, 1]] = 2;
        let out = expand_labels(&mask, 3, false);
        assert_eq!(out.dim(), (3, 3, 3));

        let sums = out.sum_axis(Axis(2));
        assert!(sums.iter().all(|&s| s == 1.0));
        assert_eq!(out[[0, 0, 1]], 1.0);
        assert_eq!(out[[1, 1, 2]], 1.0);
        assert_eq!(out[[2, 2, 0]], 1.0);
    }

    #[test]
    fn background_removal_leaves_background_pixels_all_zero() {
        let mut mask = Array2::<u8>::zeros((2, 2));
        mask[[0, 0]] = 2;
        let out = expand_labels(&mask, 3, true);
        assert_eq!(out.dim(), (2, 2, 2));
        assert_eq!(out[[0, 0, 1]], 1.0);

        let background_sum: f32 = out.slice(s![1, 1, ..]).sum();
        assert_eq!(background_sum, 0.0);
    }

    #[test]
    fn volumetric_expansion_is_channel_first() {
        let mut mask = Array3::<u8>::zeros((2, 2, 2));
        mask[[1, 0, 0]] = 1;
        let out = expand_labels_3d(&mask, 2, false);
        assert_eq!(out.dim(), (2, 2, 2, 2));
        assert_eq!(out[[1, 1, 0, 0]], 1.0);
        assert_eq!(out[[0, 1, 0, 0]], 0.0);
        assert_eq!(out[[0, 0, 0, 0]], 1.0);
    }
}
