use super::BatchTransform;
use crate::{common::*, error::*};
use ndarray::ArrayViewMut3;

#[derive(Debug, Clone, PartialEq)]
pub struct RandomMirrorInit {
    /// Spatial axes eligible for flipping: 0 = height, 1 = width.
    pub axes: Vec<usize>,
    pub p_per_sample: f64,
}

impl Default for RandomMirrorInit {
    fn default() -> Self {
        Self {
            axes: vec![0, 1],
            p_per_sample: 0.5,
        }
    }
}

impl RandomMirrorInit {
    pub fn build(self) -> RandomMirror {
        let Self { axes, p_per_sample } = self;
        RandomMirror { axes, p_per_sample }
    }
}

/// Random spatial flips, applied identically to image and label so the
/// geometry stays paired.
#[derive(Debug, Clone)]
pub struct RandomMirror {
    axes: Vec<usize>,
    p_per_sample: f64,
}

fn flip_inplace(mut view: ArrayViewMut3<f32>, axis: usize) {
    let mut reversed = view.view();
    reversed.invert_axis(Axis(axis));
    let reversed = reversed.to_owned();
    view.assign(&reversed);
}

impl BatchTransform for RandomMirror {
    fn apply(
        &self,
        mut x: Array4<f32>,
        mut y: Array4<f32>,
        rng: &mut StdRng,
    ) -> Result<(Array4<f32>, Array4<f32>)> {
        let batch_size = x.len_of(Axis(0));

        for n in 0..batch_size {
            if rng.gen::<f64>() >= self.p_per_sample {
                continue;
            }
            for &axis in &self.axes {
                if rng.gen::<f64>() >= 0.5 {
                    continue;
                }
                flip_inplace(x.index_axis_mut(Axis(0), n), axis);
                flip_inplace(y.index_axis_mut(Axis(0), n), axis);
            }
        }

        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_and_label_flip_together() {
        let mut x = Array4::<f32>::zeros((1, 2, 3, 1));
        x[[0, 0, 0, 0]] = 1.0;
        let y = x.clone();

        let mirror = RandomMirrorInit {
            axes: vec![1],
            p_per_sample: 1.0,
        }
        .build();

        // run until a flip happens; per axis it is a fair coin
        let mut rng = StdRng::seed_from_u64(1);
        let mut flipped = None;
        for _ in 0..32 {
            let (cx, cy) = mirror.apply(x.clone(), y.clone(), &mut rng).unwrap();
            if cx != x {
                flipped = Some((cx, cy));
                break;
            }
        }
        let (cx, cy) = flipped.expect("no flip within 32 draws");
        assert_eq!(cx, cy);
        assert_eq!(cx[[0, 0, 2, 0]], 1.0);
    }
}
