use super::BatchTransform;
use crate::{common::*, error::*};
use rand_distr::{Distribution, Normal};

#[derive(Debug, Clone, PartialEq)]
pub struct RandomBrightnessInit {
    pub mu: f32,
    pub sigma: f32,
    pub p_per_sample: f64,
}

impl RandomBrightnessInit {
    pub fn build(self) -> Result<RandomBrightness> {
        let Self {
            mu,
            sigma,
            p_per_sample,
        } = self;
        let shift = Normal::new(mu, sigma).map_err(|err| {
            GeneratorError::InvalidConfig(format!("brightness shift distribution: {err}"))
        })?;
        Ok(RandomBrightness {
            shift,
            p_per_sample,
        })
    }
}

/// Per-sample additive brightness shift drawn from a normal distribution.
/// Labels pass through.
#[derive(Debug, Clone)]
pub struct RandomBrightness {
    shift: Normal<f32>,
    p_per_sample: f64,
}

impl BatchTransform for RandomBrightness {
    fn apply(
        &self,
        mut x: Array4<f32>,
        y: Array4<f32>,
        rng: &mut StdRng,
    ) -> Result<(Array4<f32>, Array4<f32>)> {
        let batch_size = x.len_of(Axis(0));

        for n in 0..batch_size {
            if rng.gen::<f64>() >= self.p_per_sample {
                continue;
            }
            let shift = self.shift.sample(rng);
            x.index_axis_mut(Axis(0), n).mapv_inplace(|v| v + shift);
        }

        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sigma_shifts_by_exactly_mu() {
        let x = Array4::from_elem((2, 2, 2, 1), 10.0_f32);
        let y = Array4::<f32>::zeros((2, 2, 2, 1));
        let mut rng = StdRng::seed_from_u64(0);

        let brightness = RandomBrightnessInit {
            mu: 5.0,
            sigma: 0.0,
            p_per_sample: 1.0,
        }
        .build()
        .unwrap();
        let (x, y) = brightness.apply(x, y, &mut rng).unwrap();
        for &v in &x {
            assert_eq!(v, 15.0);
        }
        for &v in &y {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn negative_sigma_is_rejected_at_build() {
        let init = RandomBrightnessInit {
            mu: 0.0,
            sigma: -1.0,
            p_per_sample: 1.0,
        };
        assert!(matches!(
            init.build(),
            Err(GeneratorError::InvalidConfig(_))
        ));
    }
}
