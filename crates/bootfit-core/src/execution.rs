//! Execution engines for controlling computation strategy
//!
//! Bootstrap iterations are embarrassingly parallel: each one is a pure
//! function of its iteration index and the read-only model, so the only
//! scheduling decision is sequential versus parallel dispatch. This module
//! abstracts that decision behind a single engine interface so callers see
//! the same contract either way.

use crate::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// How often the sequential engine emits a progress event.
const PROGRESS_EVERY: usize = 100;

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Process iterations sequentially, in index order
    Sequential,
    /// Distribute iterations across a thread pool
    Parallel,
}

/// Worker-count selection for parallel execution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerCount {
    /// Available hardware concurrency minus one, floor 1
    Auto,
    /// An explicit number of workers (must be positive)
    Fixed(usize),
}

impl WorkerCount {
    /// Resolve to a concrete worker count.
    ///
    /// `Auto` leaves one hardware thread for the caller; `Fixed(0)` is a
    /// configuration error and must be rejected before resolution.
    pub fn resolve(&self) -> usize {
        match self {
            WorkerCount::Auto => std::thread::available_parallelism()
                .map(|n| n.get().saturating_sub(1))
                .unwrap_or(1)
                .max(1),
            WorkerCount::Fixed(n) => (*n).max(1),
        }
    }

    /// Validate the selection without resolving it.
    pub fn validate(&self) -> Result<()> {
        match self {
            WorkerCount::Fixed(0) => Err(Error::InvalidParameter(
                "worker count must be positive".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for WorkerCount {
    fn default() -> Self {
        WorkerCount::Auto
    }
}

/// Trait for execution engines that run a batch of independent iterations
///
/// `run_batch` invokes `f(i)` for every `i` in `0..count` and collects the
/// results indexed by iteration number. Implementations may run iterations
/// in any order, but slot `i` of the output always holds the result of
/// iteration `i` - per-iteration diagnostics stay attributable under
/// parallel dispatch.
pub trait ExecutionEngine: Clone + Send + Sync {
    /// Run `count` independent iterations and gather results by index
    fn run_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// Get the execution strategy
    fn strategy(&self) -> ExecutionStrategy;

    /// Get the number of workers this engine dispatches over
    fn num_workers(&self) -> usize;
}

/// Sequential execution engine
///
/// Runs all iterations in index order on the calling thread, emitting a
/// progress event every [`PROGRESS_EVERY`] iterations.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionEngine for SequentialEngine {
    fn run_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count)
            .map(|i| {
                let result = f(i);
                if (i + 1) % PROGRESS_EVERY == 0 {
                    debug!(completed = i + 1, total = count, "batch progress");
                }
                result
            })
            .collect()
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Sequential
    }

    fn num_workers(&self) -> usize {
        1
    }
}

/// Parallel execution engine using Rayon
///
/// Without a dedicated pool, iterations run on the global Rayon pool. With
/// one (see [`ParallelEngine::with_workers`]), the pool bounds worker count
/// for this engine alone.
#[derive(Clone, Debug, Default)]
pub struct ParallelEngine {
    thread_pool: Option<Arc<rayon::ThreadPool>>,
}

impl ParallelEngine {
    /// Create a parallel engine over the global thread pool
    pub fn new() -> Self {
        Self { thread_pool: None }
    }

    /// Create a parallel engine with a dedicated pool of `workers` threads
    pub fn with_workers(workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| Error::Execution(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            thread_pool: Some(Arc::new(pool)),
        })
    }
}

impl ExecutionEngine for ParallelEngine {
    fn run_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        if let Some(pool) = &self.thread_pool {
            pool.install(|| (0..count).into_par_iter().map(f).collect())
        } else {
            (0..count).into_par_iter().map(f).collect()
        }
    }

    fn strategy(&self) -> ExecutionStrategy {
        ExecutionStrategy::Parallel
    }

    fn num_workers(&self) -> usize {
        if let Some(pool) = &self.thread_pool {
            pool.current_num_threads()
        } else {
            rayon::current_num_threads()
        }
    }
}

/// Create a sequential engine
pub fn sequential() -> SequentialEngine {
    SequentialEngine::new()
}

/// Create a parallel engine over the global thread pool
pub fn parallel() -> ParallelEngine {
    ParallelEngine::new()
}

/// Create a parallel engine with an explicit worker count
pub fn parallel_with_workers(workers: usize) -> Result<ParallelEngine> {
    ParallelEngine::with_workers(workers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_engine() {
        let engine = sequential();

        let squares = engine.run_batch(5, |i| i * i);
        assert_eq!(squares, vec![0, 1, 4, 9, 16]);

        assert_eq!(engine.strategy(), ExecutionStrategy::Sequential);
        assert_eq!(engine.num_workers(), 1);
    }

    #[test]
    fn test_parallel_engine_matches_sequential() {
        let engine = parallel_with_workers(4).unwrap();

        let results = engine.run_batch(100, |i| i * 2);
        let expected: Vec<usize> = (0..100).map(|i| i * 2).collect();
        // Results are indexed by iteration regardless of completion order
        assert_eq!(results, expected);

        assert_eq!(engine.strategy(), ExecutionStrategy::Parallel);
        assert_eq!(engine.num_workers(), 4);
    }

    #[test]
    fn test_parallel_engine_global_pool() {
        let engine = parallel();
        assert!(engine.num_workers() > 0);

        let sums = engine.run_batch(10, |i| i + 1);
        assert_eq!(sums, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_worker_count_resolution() {
        assert_eq!(WorkerCount::Fixed(3).resolve(), 3);
        assert!(WorkerCount::Auto.resolve() >= 1);

        assert!(WorkerCount::Fixed(0).validate().is_err());
        assert!(WorkerCount::Fixed(2).validate().is_ok());
        assert!(WorkerCount::Auto.validate().is_ok());
    }

    #[test]
    fn test_empty_batch() {
        let engine = sequential();
        let results: Vec<usize> = engine.run_batch(0, |i| i);
        assert!(results.is_empty());
    }
}
