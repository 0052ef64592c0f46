//! The 2D slice batch generator: class-balanced slice sampling over whole
//! cases, shape normalization, and the transform pipeline contract.

use crate::{
    common::*,
    config::GeneratorConfig,
    error::*,
    label::expand_labels,
    processor::BatchTransform,
    sampling::{positive_slice_index, random_slice_index, SamplingMode, SlicePolicy},
    scheduler::IndexScheduler,
};
use nii_vol::{normalize_pair, to_channels_last, CaseSource};
use std::sync::PoisonError;

/// Produces `(X, Y)` batches of 2D slices, channel-last `(N, H, W, C)`.
///
/// Designed to be shared across data-loading workers: `fetch` takes `&self`,
/// and the index pool is the only synchronized state. Batches for different
/// indices may be produced out of order; the only ordering contract is that
/// balanced batches are shuffled internally before return.
#[derive(Debug)]
pub struct SliceBatchGenerator {
    config: GeneratorConfig,
    case_ids: IndexSet<String>,
    source: Arc<dyn CaseSource>,
    transform: Option<Box<dyn BatchTransform>>,
    mode: SamplingMode,
    scheduler: Mutex<IndexScheduler>,
    rng: Mutex<StdRng>,
}

impl SliceBatchGenerator {
    pub fn new(
        config: GeneratorConfig,
        case_ids: impl IntoIterator<Item = String>,
        source: Arc<dyn CaseSource>,
        transform: Option<Box<dyn BatchTransform>>,
    ) -> Result<Self> {
        config.validate()?;
        let case_ids: IndexSet<String> = case_ids.into_iter().collect();
        if case_ids.is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "case id list is empty".into(),
            ));
        }

        let mode = SamplingMode::classify(config.n_pos, config.batch_size)?;
        let (scheduler_rng, batch_rng) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };
        let scheduler = IndexScheduler::new(case_ids.len(), config.shuffle, scheduler_rng);

        Ok(Self {
            config,
            case_ids,
            source,
            transform,
            mode,
            scheduler: Mutex::new(scheduler),
            rng: Mutex::new(batch_rng),
        })
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    pub fn num_cases(&self) -> usize {
        self.case_ids.len()
    }

    /// Batches per epoch; independent of the dataset size.
    pub fn len(&self) -> usize {
        self.config.steps_per_epoch
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn on_epoch_end(&self) {
        self.scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_epoch_end();
    }

    /// Fetch batch `idx`.
    ///
    /// Any load failure or degenerate all-background case under positive
    /// sampling aborts the whole fetch; partial batches are never returned.
    pub fn fetch(&self, idx: usize) -> Result<(Array4<f32>, Array4<f32>)> {
        let batch_size = self.config.batch_size;

        let indexes = self
            .scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .batch_indices(idx, batch_size);
        let ids = indexes
            .iter()
            .map(|&k| {
                self.case_ids
                    .get_index(k)
                    .map(String::as_str)
                    .expect("scheduler produced an index past the case list")
            })
            .collect_vec();

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let (xs, ys) = match self.mode {
            SamplingMode::Random => self.compose_subbatch(&ids, SlicePolicy::Random, &mut rng)?,
            SamplingMode::Positive => {
                self.compose_subbatch(&ids, SlicePolicy::Positive, &mut rng)?
            }
            SamplingMode::Balanced { n_pos } => {
                let (mut xs, mut ys) =
                    self.compose_subbatch(&ids[..n_pos], SlicePolicy::Positive, &mut rng)?;
                let (x_rand, y_rand) =
                    self.compose_subbatch(&ids[n_pos..], SlicePolicy::Random, &mut rng)?;
                xs.extend(x_rand);
                ys.extend(y_rand);

                // interleave positive and random examples
                let mut order: Vec<usize> = (0..xs.len()).collect();
                order.shuffle(&mut *rng);
                (permute(xs, &order), permute(ys, &order))
            }
        };

        let x_views = xs.iter().map(|a| a.view()).collect_vec();
        let y_views = ys.iter().map(|a| a.view()).collect_vec();
        let x = ndarray::stack(Axis(0), &x_views)?;
        let y = ndarray::stack(Axis(0), &y_views)?;

        let (x, y) = match &self.transform {
            Some(transform) => {
                let (x, y) = transform.apply(x, y, &mut rng)?;
                let x_len = x.len_of(Axis(0));
                let y_len = y.len_of(Axis(0));
                if x_len != batch_size || y_len != batch_size {
                    let found = if x_len != batch_size { x_len } else { y_len };
                    return Err(GeneratorError::BatchSizeMismatch {
                        expected: batch_size,
                        found,
                    });
                }
                (x, y)
            }
            None => (x, y),
        };

        assert_eq!(
            x.len_of(Axis(0)),
            batch_size,
            "composed batch does not match the configured batch size"
        );
        Ok((x, y))
    }

    fn compose_subbatch(
        &self,
        ids: &[&str],
        policy: SlicePolicy,
        rng: &mut StdRng,
    ) -> Result<(Vec<Array3<f32>>, Vec<Array3<f32>>)> {
        let target = self.config.spatial_shape();
        let mut xs = Vec::with_capacity(ids.len());
        let mut ys = Vec::with_capacity(ids.len());

        for &id in ids {
            let case = self.source.load(id)?;
            let z = match policy {
                SlicePolicy::Positive => positive_slice_index(case.mask()).ok_or_else(|| {
                    GeneratorError::NoPositiveSlice {
                        case_id: id.to_owned(),
                    }
                })?,
                SlicePolicy::Random => random_slice_index(case.num_slices(), rng),
            };

            let (image, mask) = case.slice_pair(z);
            let x = to_channels_last(image);
            let y = expand_labels(&mask, self.config.n_classes, self.config.remove_background);
            let (x, y) = normalize_pair(
                x,
                y,
                target,
                self.config.input_channels(),
                self.config.label_channels(),
            )?;

            xs.push(x);
            ys.push(y);
        }

        Ok((xs, ys))
    }
}

fn permute<T>(items: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .iter()
        .map(|&i| slots[i].take().expect("permutation index used twice"))
        .collect()
}
