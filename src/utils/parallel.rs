//! Parallel processing utilities

use crate::error::{Result, SkewError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Worker count derived from an `n_jobs` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Requested jobs: `1` sequential, `-1` all threads, `-k` threads + 1 - k
    pub n_jobs: i32,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self { n_jobs: 1 }
    }
}

impl ParallelConfig {
    /// Create a configuration for `n_jobs`
    pub fn new(n_jobs: i32) -> Self {
        Self { n_jobs }
    }

    /// Resolve the number of workers given `available` execution units.
    ///
    /// Negative values count back from `available + 1`; the result is at least 1.
    pub fn workers_for(&self, available: usize) -> Result<usize> {
        match self.n_jobs {
            0 => Err(SkewError::InvalidParameter {
                name: "n_jobs".to_string(),
                value: "0".to_string(),
                reason: "must be non-zero".to_string(),
            }),
            n if n > 0 => Ok(n as usize),
            n => {
                let workers = available as i64 + 1 + n as i64;
                Ok(workers.max(1) as usize)
            }
        }
    }

    /// Resolve the number of workers on this machine
    pub fn num_workers(&self) -> Result<usize> {
        self.workers_for(rayon::current_num_threads())
    }
}

/// Map `f` over `items`, preserving input order in the output.
///
/// Runs inline when a single worker is requested, otherwise on a dedicated
/// rayon pool of `workers` threads. The first error aborts the collection.
pub fn try_parallel_map<T, U, F>(items: &[T], workers: usize, f: F) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U> + Send + Sync,
{
    if workers <= 1 || items.len() <= 1 {
        return items.iter().map(f).collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.min(items.len()))
        .build()
        .map_err(|e| SkewError::ThreadPoolError(e.to_string()))?;

    pool.install(|| items.par_iter().map(f).collect())
}
