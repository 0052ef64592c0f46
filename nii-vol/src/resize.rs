//! 2D resampling used to reconcile heterogeneous case resolutions into the
//! fixed model input shape.

use crate::{common::*, error::*};

/// Bilinear resize of a channel-last `(H, W, C)` array to `(out_h, out_w, C)`.
///
/// Uses the half-pixel-center convention, so resizing to the identical shape
/// reproduces the input exactly.
pub fn resize_bilinear(src: &Array3<f32>, out_h: usize, out_w: usize) -> Array3<f32> {
    let (in_h, in_w, channels) = src.dim();
    let mut out = Array3::<f32>::zeros((out_h, out_w, channels));

    let scale_y = in_h as f32 / out_h as f32;
    let scale_x = in_w as f32 / out_w as f32;

    for oy in 0..out_h {
        let fy = ((oy as f32 + 0.5) * scale_y - 0.5).clamp(0.0, (in_h - 1) as f32);
        let y0 = fy.floor() as usize;
        let y1 = (y0 + 1).min(in_h - 1);
        let wy = fy - y0 as f32;

        for ox in 0..out_w {
            let fx = ((ox as f32 + 0.5) * scale_x - 0.5).clamp(0.0, (in_w - 1) as f32);
            let x0 = fx.floor() as usize;
            let x1 = (x0 + 1).min(in_w - 1);
            let wx = fx - x0 as f32;

            for c in 0..channels {
                let top = src[[y0, x0, c]] * (1.0 - wx) + src[[y0, x1, c]] * wx;
                let bottom = src[[y1, x0, c]] * (1.0 - wx) + src[[y1, x1, c]] * wx;
                out[[oy, ox, c]] = top * (1.0 - wy) + bottom * wy;
            }
        }
    }

    out
}

/// Bring an extracted image/label slice pair to the target spatial shape.
///
/// Pairs that already match are returned untouched; anything else is
/// resampled on both sides independently, preserving each side's channel
/// count. Channel counts disagreeing with the expected ones are an error
/// rather than being silently resampled.
pub fn normalize_pair(
    x: Array3<f32>,
    y: Array3<f32>,
    target: (usize, usize),
    x_channels: usize,
    y_channels: usize,
) -> Result<(Array3<f32>, Array3<f32>)> {
    let (target_h, target_w) = target;

    if x.len_of(Axis(2)) != x_channels {
        return Err(VolumeError::ShapeMismatch {
            expected: vec![target_h, target_w, x_channels],
            found: x.shape().to_vec(),
        });
    }
    if y.len_of(Axis(2)) != y_channels {
        return Err(VolumeError::ShapeMismatch {
            expected: vec![target_h, target_w, y_channels],
            found: y.shape().to_vec(),
        });
    }

    let x_spatial = (x.len_of(Axis(0)), x.len_of(Axis(1)));
    let y_spatial = (y.len_of(Axis(0)), y.len_of(Axis(1)));
    if x_spatial == target && y_spatial == target {
        return Ok((x, y));
    }

    let x = resize_bilinear(&x, target_h, target_w);
    let y = resize_bilinear(&y, target_h, target_w);
    Ok((x, y))
}
