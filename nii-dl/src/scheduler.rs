//! Per-epoch index scheduling with on-demand growth.

use crate::common::*;
use getset::CopyGetters;

/// Owns the shuffled index permutation over all cases.
///
/// The number of steps per epoch is configured independently of the dataset
/// size, so arbitrary batch indices are first-class: when a requested batch
/// reaches past the current pool, the pool grows by appending fresh
/// permutations instead of raising an out-of-range error.
#[derive(Debug, CopyGetters)]
pub struct IndexScheduler {
    indexes: Vec<usize>,
    num_cases: usize,
    shuffle: bool,
    /// Epoch counter, bumped by `on_epoch_end`.
    #[getset(get_copy = "pub")]
    epoch: usize,
    /// How many times the pool had to grow. Diagnostic only.
    #[getset(get_copy = "pub")]
    adjustments: usize,
    rng: StdRng,
}

impl IndexScheduler {
    pub fn new(num_cases: usize, shuffle: bool, rng: StdRng) -> Self {
        assert!(num_cases > 0, "scheduler requires at least one case");
        let mut scheduler = Self {
            indexes: Vec::new(),
            num_cases,
            shuffle,
            epoch: 0,
            adjustments: 0,
            rng,
        };
        scheduler.indexes = scheduler.fresh_permutation();
        scheduler
    }

    /// Case indices for batch `idx`. Never fails for any `idx`; the backing
    /// pool is extended on demand.
    pub fn batch_indices(&mut self, idx: usize, batch_size: usize) -> Vec<usize> {
        let start = idx * batch_size;
        let end = start + batch_size;
        if end > self.indexes.len() {
            self.adjust(end);
        }
        self.indexes[start..end].to_vec()
    }

    /// Epoch boundary: reset the pool to a single fresh permutation,
    /// reshuffled only when shuffling is enabled.
    pub fn on_epoch_end(&mut self) {
        self.epoch += 1;
        self.indexes = self.fresh_permutation();
    }

    pub fn pool_len(&self) -> usize {
        self.indexes.len()
    }

    fn adjust(&mut self, required: usize) {
        warn!(
            "index pool of {} entries cannot cover batch end {}; growing",
            self.indexes.len(),
            required
        );
        while self.indexes.len() < required {
            let extension = self.fresh_permutation();
            self.indexes.extend(extension);
        }
        self.adjustments += 1;
    }

    fn fresh_permutation(&mut self) -> Vec<usize> {
        let mut permutation: Vec<usize> = (0..self.num_cases).collect();
        if self.shuffle {
            permutation.shuffle(&mut self.rng);
        }
        permutation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler(num_cases: usize, shuffle: bool) -> IndexScheduler {
        IndexScheduler::new(num_cases, shuffle, StdRng::seed_from_u64(17))
    }

    #[test]
    fn batch_indices_cover_the_requested_slice() {
        let mut sched = scheduler(10, false);
        assert_eq!(sched.batch_indices(0, 4), vec![0, 1, 2, 3]);
        assert_eq!(sched.batch_indices(1, 4), vec![4, 5, 6, 7]);
    }

    #[test]
    fn far_batch_index_grows_instead_of_failing() {
        let mut sched = scheduler(20, true);
        let indices = sched.batch_indices(50, 4);
        assert_eq!(indices.len(), 4);
        assert!(indices.iter().all(|&k| k < 20));
        assert!(sched.pool_len() >= 51 * 4);
        assert_eq!(sched.adjustments(), 1);
    }

    #[test]
    fn every_case_appears_once_per_permutation() {
        let mut sched = scheduler(8, true);
        let mut seen: Vec<usize> = (0..2).flat_map(|i| sched.batch_indices(i, 4)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn epoch_end_resets_the_pool() {
        let mut sched = scheduler(6, true);
        sched.batch_indices(10, 4);
        assert!(sched.pool_len() > 6);
        sched.on_epoch_end();
        assert_eq!(sched.pool_len(), 6);
        assert_eq!(sched.epoch(), 1);
    }

    #[test]
    fn unshuffled_scheduler_is_deterministic() {
        let mut a = scheduler(5, false);
        let mut b = scheduler(5, false);
        assert_eq!(a.batch_indices(3, 3), b.batch_indices(3, 3));
    }
}
