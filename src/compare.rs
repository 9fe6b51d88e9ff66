//! Side by side workloads for [`AvlTree`] and [`RbTree`].
//!
//! Every repetition draws one random operation stream and applies it to a
//! fresh tree of each kind, so both engines see exactly the same keys in the
//! same order.
//!
//! ```
//! use avlrb::compare::{self, Workload, WorkloadKind};
//!
//! let workload = Workload::new(WorkloadKind::Insert).size(1_000).repetitions(2);
//! let comparison = compare::compare(&workload).unwrap();
//! assert!(comparison.avl.mean_rotations > 0.0);
//! assert!(comparison.avl.mean_height >= 10.0);
//! ```

use std::ops::Range;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{AvlTree, BalancedTree, RbTree};

#[derive(Debug, Clone, PartialEq, Eq, onlyerror::Error)]
pub enum Error {
    #[error("workload size must be greater than zero")]
    EmptyWorkload,
    #[error("number of repetitions must be greater than zero")]
    NoRepetitions,
    #[error("key range {0:?} is empty")]
    EmptyKeyRange(Range<u32>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    /// Inserts `size` random keys into empty trees.
    Insert,
    /// Prefills `size / 2` random keys, then runs `size` operations:
    /// 40% insert, 30% remove and 30% contains.
    Mixed,
}

/// A single step of a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert(u32),
    Remove(u32),
    Contains(u32),
}

/// Parameters of a comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub kind: WorkloadKind,
    pub size: usize,
    pub repetitions: usize,
    pub key_range: Range<u32>,
    /// Repetition `r` uses `seed + r`, making every run reproducible.
    pub seed: u64,
}

/// Measurements of one engine over one repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub duration: Duration,
    pub rotations: usize,
    pub height: usize,
}

/// Measurements of one engine averaged over all repetitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineStats {
    pub mean_duration: Duration,
    pub mean_rotations: f64,
    pub mean_height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub workload: Workload,
    pub avl: EngineStats,
    pub rb: EngineStats,
}

impl Workload {
    pub const DEFAULT_SIZE: usize = 10_000;
    pub const DEFAULT_REPETITIONS: usize = 5;
    pub const DEFAULT_KEY_RANGE: Range<u32> = 0..1_000_000;

    pub fn new(kind: WorkloadKind) -> Self {
        Self {
            kind,
            size: Self::DEFAULT_SIZE,
            repetitions: Self::DEFAULT_REPETITIONS,
            key_range: Self::DEFAULT_KEY_RANGE,
            seed: 0,
        }
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn key_range(mut self, key_range: Range<u32>) -> Self {
        self.key_range = key_range;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.size == 0 {
            return Err(Error::EmptyWorkload);
        }
        if self.repetitions == 0 {
            return Err(Error::NoRepetitions);
        }
        if self.key_range.is_empty() {
            return Err(Error::EmptyKeyRange(self.key_range.clone()));
        }
        Ok(())
    }

    /// Generates the keys inserted before measuring and the measured operations
    /// for repetition `repetition`.
    pub fn generate(&self, repetition: usize) -> (Vec<u32>, Vec<Operation>) {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(repetition as u64));
        let mut key = || rng.gen_range(self.key_range.clone());
        match self.kind {
            WorkloadKind::Insert => {
                let operations: Vec<Operation> =
                    (0..self.size).map(|_| Operation::Insert(key())).collect();
                (Vec::new(), operations)
            }
            WorkloadKind::Mixed => {
                let prefill: Vec<u32> = (0..self.size / 2).map(|_| key()).collect();
                let mut operations = Vec::with_capacity(self.size);
                for _ in 0..self.size {
                    let choice = rng.gen_range(0..10);
                    let key = rng.gen_range(self.key_range.clone());
                    operations.push(match choice {
                        0..=3 => Operation::Insert(key),
                        4..=6 => Operation::Remove(key),
                        _ => Operation::Contains(key),
                    });
                }
                (prefill, operations)
            }
        }
    }
}

impl Default for Workload {
    fn default() -> Self {
        Self::new(WorkloadKind::Mixed)
    }
}

impl Comparison {
    /// AVL duration divided by red-black duration.
    /// Values above 1 mean the red-black tree was faster.
    pub fn time_ratio(&self) -> f64 {
        let rb = self.rb.mean_duration.as_secs_f64();
        if rb == 0.0 {
            return f64::NAN;
        }
        self.avl.mean_duration.as_secs_f64() / rb
    }
}

impl EngineStats {
    fn average(runs: &[RunStats]) -> Self {
        let count = runs.len().max(1);
        let total_duration: Duration = runs.iter().map(|run| run.duration).sum();
        let total_rotations: usize = runs.iter().map(|run| run.rotations).sum();
        let total_height: usize = runs.iter().map(|run| run.height).sum();
        Self {
            mean_duration: total_duration / count as u32,
            mean_rotations: total_rotations as f64 / count as f64,
            mean_height: total_height as f64 / count as f64,
        }
    }
}

/// Prefills a fresh tree, resets its rotation counter and times `operations`.
pub fn run_operations<T>(prefill: &[u32], operations: &[Operation]) -> RunStats
where
    T: BalancedTree<u32> + Default,
{
    let mut tree = T::default();
    for key in prefill {
        tree.insert(*key);
    }
    tree.reset_rotations();

    let start = Instant::now();
    for operation in operations {
        apply(&mut tree, *operation);
    }
    let duration = start.elapsed();

    RunStats {
        duration,
        rotations: tree.rotations(),
        height: tree.height(),
    }
}

/// Applies one operation, returning the outcome of removals and lookups.
pub fn apply<T: BalancedTree<u32>>(tree: &mut T, operation: Operation) -> bool {
    match operation {
        Operation::Insert(key) => {
            tree.insert(key);
            true
        }
        Operation::Remove(key) => tree.remove(&key),
        Operation::Contains(key) => std::hint::black_box(tree.contains(&key)),
    }
}

/// Runs `workload` against both engines and averages the measurements.
pub fn compare(workload: &Workload) -> Result<Comparison, Error> {
    workload.validate()?;

    let mut avl_runs = Vec::with_capacity(workload.repetitions);
    let mut rb_runs = Vec::with_capacity(workload.repetitions);
    for repetition in 0..workload.repetitions {
        let (prefill, operations) = workload.generate(repetition);

        let rb = run_operations::<RbTree<u32>>(&prefill, &operations);
        let avl = run_operations::<AvlTree<u32>>(&prefill, &operations);
        log::debug!(
            "{:?} repetition {}: avl {:?} {} rotations height {}, red-black {:?} {} rotations height {}",
            workload.kind,
            repetition,
            avl.duration,
            avl.rotations,
            avl.height,
            rb.duration,
            rb.rotations,
            rb.height,
        );

        avl_runs.push(avl);
        rb_runs.push(rb);
    }

    let comparison = Comparison {
        workload: workload.clone(),
        avl: EngineStats::average(&avl_runs),
        rb: EngineStats::average(&rb_runs),
    };
    log::info!(
        "{:?} workload of {} operations: avl/red-black time ratio {:.3}",
        workload.kind,
        workload.size,
        comparison.time_ratio(),
    );
    Ok(comparison)
}
