//! Bootstrap confidence intervals for fitted distribution models
//!
//! `bootfit` quantifies the estimation uncertainty of a fitted probability
//! distribution by resampling: it regenerates or resamples data, refits the
//! model to every replicate, and summarizes the spread of the replicate
//! estimates into per-parameter confidence intervals (percentile or BCa).
//!
//! The workspace is split into two crates, both re-exported here:
//!
//! - [`bootfit_core`]: error type, execution engines, model/parameter types,
//!   and the distribution-registry / estimation-module interfaces with
//!   statrs-backed reference implementations.
//! - [`bootfit_confidence`]: the bootstrap engine - replicate generation,
//!   jackknife, interval methods, and the orchestrator.
//!
//! # Example
//!
//! ```rust
//! use bootfit::{
//!     bootstrap_ci, BootstrapConfig, Family, FitMethod, FittedModel,
//!     ClosedFormEstimator, ModelEstimator, ResampleMode,
//! };
//!
//! let sample: Vec<f64> = (0..200).map(|i| 5.0 + (i % 13) as f64 * 0.3).collect();
//! let estimate = ClosedFormEstimator
//!     .fit(&sample, Family::Normal, FitMethod::MaximumLikelihood)
//!     .unwrap();
//! let model = FittedModel::new(sample, Family::Normal, FitMethod::MaximumLikelihood, estimate)
//!     .unwrap();
//!
//! let config = BootstrapConfig {
//!     mode: ResampleMode::NonParametric,
//!     replicate_count: 500,
//!     seed: Some(42),
//!     ..BootstrapConfig::default()
//! };
//! let report = bootstrap_ci(&model, config).unwrap();
//! let mean_ci = report.intervals.get("mean").unwrap();
//! assert!(mean_ci.lower <= mean_ci.estimate && mean_ci.estimate <= mean_ci.upper);
//! ```

pub use bootfit_confidence;
pub use bootfit_core;

pub use bootfit_core::{
    parallel, sequential, ClosedFormEstimator, DistributionRegistry, Error, ExecutionEngine,
    Family, FitMethod, FittedModel, ModelEstimator, ParallelEngine, Parameters, Result,
    SequentialEngine, StatrsRegistry, WorkerCount,
};

pub use bootfit_confidence::{
    bootstrap_ci, fit_and_bootstrap, BootstrapCi, BootstrapConfig, BootstrapReport,
    BootstrapWarning, ConfidenceInterval, IntervalReport, ReplicateMatrix, ResampleMode,
    DEFAULT_REPLICATES, FAST_REPLICATES, HIGH_PRECISION_REPLICATES,
};
