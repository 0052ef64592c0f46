use super::BatchTransform;
use crate::{common::*, error::*};

#[derive(Debug, Clone, PartialEq)]
pub struct GammaTransformInit {
    pub gamma_range: (f64, f64),
    pub p_per_sample: f64,
}

impl Default for GammaTransformInit {
    fn default() -> Self {
        Self {
            gamma_range: (0.7, 1.5),
            p_per_sample: 0.3,
        }
    }
}

impl GammaTransformInit {
    pub fn build(self) -> GammaTransform {
        let Self {
            gamma_range,
            p_per_sample,
        } = self;
        GammaTransform {
            gamma_range,
            p_per_sample,
        }
    }
}

/// Per-sample gamma jitter on image intensities. The sample is mapped to
/// `[0, 1]` over its own value range, raised to a random gamma, then mapped
/// back, so the value range is retained. Labels pass through.
#[derive(Debug, Clone)]
pub struct GammaTransform {
    gamma_range: (f64, f64),
    p_per_sample: f64,
}

impl BatchTransform for GammaTransform {
    fn apply(
        &self,
        mut x: Array4<f32>,
        y: Array4<f32>,
        rng: &mut StdRng,
    ) -> Result<(Array4<f32>, Array4<f32>)> {
        let (lo, hi) = self.gamma_range;
        let batch_size = x.len_of(Axis(0));

        for n in 0..batch_size {
            if rng.gen::<f64>() >= self.p_per_sample {
                continue;
            }
            let gamma = rng.gen_range(lo..hi) as f32;

            let mut sample = x.index_axis_mut(Axis(0), n);
            let min = sample.iter().copied().fold(f32::INFINITY, f32::min);
            let max = sample.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let range = max - min;
            if !range.is_finite() || range <= f32::EPSILON {
                continue;
            }
            sample.mapv_inplace(|v| ((v - min) / range).powf(gamma) * range + min);
        }

        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn value_range_is_retained() {
        let x = ndarray::Array::linspace(0.0_f32, 200.0, 16)
            .into_shape((1, 4, 4, 1))
            .unwrap();
        let y = Array4::<f32>::zeros((1, 4, 4, 1));
        let mut rng = StdRng::seed_from_u64(5);

        let gamma = GammaTransformInit {
            gamma_range: (0.7, 1.5),
            p_per_sample: 1.0,
        }
        .build();
        let (x, _) = gamma.apply(x, y, &mut rng).unwrap();

        let min = x.iter().copied().fold(f32::INFINITY, f32::min);
        let max = x.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert_abs_diff_eq!(min, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(max, 200.0, epsilon = 1e-2);
    }

    #[test]
    fn constant_sample_is_left_alone() {
        let x = Array4::from_elem((1, 2, 2, 1), 42.0_f32);
        let y = Array4::<f32>::zeros((1, 2, 2, 1));
        let mut rng = StdRng::seed_from_u64(0);

        let gamma = GammaTransformInit {
            p_per_sample: 1.0,
            ..Default::default()
        }
        .build();
        let (out, _) = gamma.apply(x.clone(), y, &mut rng).unwrap();
        assert_eq!(out, x);
    }
}
