//! Bootstrap resampling and confidence-interval engine
//!
//! This crate quantifies the estimation uncertainty of a fitted
//! distribution model by resampling:
//!
//! - **Replicate generation**: parametric (draw from the fitted family at
//!   the point estimates) or non-parametric (resample the observations with
//!   replacement)
//! - **Refitting**: every replicate is refit with the original estimation
//!   method; a failed fit becomes a sentinel row, never an aborted run
//! - **Interval construction**: plain percentile intervals, or BCa with a
//!   jackknife-derived acceleration term
//!
//! Iterations are independent and dispatch through the execution engines in
//! [`bootfit_core`], sequentially or across a thread pool, with one seeded
//! random stream per iteration so the replicate set is reproducible.
//!
//! # Overview
//!
//! The usual entry point is [`bootstrap_ci`] (or [`fit_and_bootstrap`] from
//! raw observations); [`BootstrapCi`] is the underlying builder when custom
//! registries or estimators are needed.
//!
//! ```rust
//! use bootfit_confidence::{fit_and_bootstrap, BootstrapConfig, ResampleMode};
//! use bootfit_core::{Family, FitMethod};
//!
//! let sample: Vec<f64> = (0..150).map(|i| 10.0 + ((i * 13) % 17) as f64 * 0.1).collect();
//! let config = BootstrapConfig {
//!     mode: ResampleMode::Bca,
//!     replicate_count: 400,
//!     confidence_level: 0.95,
//!     seed: Some(42),
//!     ..BootstrapConfig::default()
//! };
//!
//! let report = fit_and_bootstrap(sample, Family::Normal, FitMethod::MaximumLikelihood, config)
//!     .unwrap();
//! let mean_ci = report.intervals.get("mean").unwrap();
//! assert!(mean_ci.lower <= mean_ci.estimate && mean_ci.estimate <= mean_ci.upper);
//! ```

pub mod api;
mod bootstrap;
mod jackknife;
mod methods;
mod replicate;
mod types;

// Re-exports
pub use api::{
    bootstrap_ci, fit_and_bootstrap, DEFAULT_REPLICATES, FAST_REPLICATES,
    HIGH_PRECISION_REPLICATES,
};
pub use bootstrap::{BootstrapCi, BootstrapConfig, BootstrapReport};
pub use jackknife::jackknife_estimates;
pub use methods::{bca_interval, compute_intervals, empirical_quantile, percentile_interval};
pub use replicate::{generate_replicate, resample_with_replacement, ReplicateMatrix};
pub use types::{BootstrapWarning, ConfidenceInterval, IntervalReport, ResampleMode};
