//! Core types and interfaces for bootstrap confidence-interval estimation
//!
//! This crate provides the foundation the bootstrap engine builds on:
//!
//! 1. **Errors** - a unified [`Error`]/[`Result`] pair for all bootfit crates
//! 2. **Execution engines** - sequential and parallel schedulers behind one
//!    [`ExecutionEngine`] interface
//! 3. **Model types** - [`FittedModel`], [`Parameters`], the closed
//!    [`Family`]/[`FitMethod`] enums
//! 4. **Collaborator interfaces** - the distribution registry and the
//!    estimation module, consumed through narrow traits with statrs-backed
//!    reference implementations
//!
//! # Example
//!
//! ```rust
//! use bootfit_core::{
//!     execution::{sequential, ExecutionEngine},
//!     ClosedFormEstimator, Family, FitMethod, ModelEstimator,
//! };
//!
//! let sample = vec![4.0, 5.0, 6.0, 5.5, 4.5];
//! let params = ClosedFormEstimator
//!     .fit(&sample, Family::Normal, FitMethod::MaximumLikelihood)
//!     .unwrap();
//! assert_eq!(params.get("mean"), Some(5.0));
//!
//! // Iterations are dispatched through an execution engine
//! let engine = sequential();
//! let doubled = engine.run_batch(3, |i| i * 2);
//! assert_eq!(doubled, vec![0, 2, 4]);
//! ```

pub mod distributions;
pub mod error;
pub mod estimate;
pub mod execution;
pub mod model;

// Re-export core types
pub use error::{Error, Result};

pub use execution::{
    parallel, parallel_with_workers, sequential, ExecutionEngine, ExecutionStrategy,
    ParallelEngine, SequentialEngine, WorkerCount,
};

pub use distributions::{DistributionRegistry, StatrsRegistry};
pub use estimate::{ClosedFormEstimator, ModelEstimator};
pub use model::{Family, FitMethod, FittedModel, Parameters};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        sequential, ClosedFormEstimator, DistributionRegistry, Error, ExecutionEngine,
        ExecutionStrategy, Family, FitMethod, FittedModel, ModelEstimator, ParallelEngine,
        Parameters, Result, SequentialEngine, StatrsRegistry, WorkerCount,
    };
}
