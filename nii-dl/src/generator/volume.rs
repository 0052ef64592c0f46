//! The 3D volume batch generator: whole channel-first cases, with cropping
//! delegated to the per-case volume transform pipeline.

use crate::{
    common::*, config::GeneratorConfig, error::*, label::expand_labels_3d,
    processor::VolumeTransform, scheduler::IndexScheduler,
};
use nii_vol::CaseSource;
use std::sync::PoisonError;

/// Produces `(X, Y)` batches of whole volumes, channel-first
/// `(N, C, Z, Y, X)`.
///
/// Slice sampling does not apply here; `n_pos` and `input_shape` are not
/// consulted. Cases have heterogeneous native shapes, so a volume transform
/// that cuts every case to a common patch is what makes them stackable;
/// without one, mixed shapes fail the batch with a stacking error.
#[derive(Debug)]
pub struct VolumeBatchGenerator {
    config: GeneratorConfig,
    case_ids: IndexSet<String>,
    source: Arc<dyn CaseSource>,
    transform: Option<Box<dyn VolumeTransform>>,
    scheduler: Mutex<IndexScheduler>,
    rng: Mutex<StdRng>,
}

impl VolumeBatchGenerator {
    pub fn new(
        config: GeneratorConfig,
        case_ids: impl IntoIterator<Item = String>,
        source: Arc<dyn CaseSource>,
        transform: Option<Box<dyn VolumeTransform>>,
    ) -> Result<Self> {
        config.validate()?;
        let case_ids: IndexSet<String> = case_ids.into_iter().collect();
        if case_ids.is_empty() {
            return Err(GeneratorError::InvalidConfig(
                "case id list is empty".into(),
            ));
        }

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
            scheduler: Mutex::new(scheduler),
            rng: Mutex::new(batch_rng),
        })
    }

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

    pub fn fetch(&self, idx: usize) -> Result<(Array5<f32>, Array5<f32>)> {
        let batch_size = self.config.batch_size;

        let indexes = self
            .scheduler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .batch_indices(idx, batch_size);

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut xs = Vec::with_capacity(batch_size);
        let mut ys = Vec::with_capacity(batch_size);

        for &k in &indexes {
            let id = self
                .case_ids
                .get_index(k)
                .map(String::as_str)
                .expect("scheduler produced an index past the case list");
            let case = self.source.load(id)?;

            let x = case.image_channels_first();
            let y = expand_labels_3d(
                case.mask(),
                self.config.n_classes,
                self.config.remove_background,
            );

            let (x, y) = match &self.transform {
                Some(transform) => transform.apply(x, y, &mut rng)?,
                None => (x, y),
            };
            xs.push(x);
            ys.push(y);
        }

        let x_views = xs.iter().map(|a| a.view()).collect_vec();
        let y_views = ys.iter().map(|a| a.view()).collect_vec();
        let x = ndarray::stack(Axis(0), &x_views)?;
        let y = ndarray::stack(Axis(0), &y_views)?;

        assert_eq!(
            x.len_of(Axis(0)),
            batch_size,
            "composed batch does not match the configured batch size"
        );
        Ok((x, y))
    }
}
