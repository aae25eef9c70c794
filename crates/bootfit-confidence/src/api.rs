//! High-level API for bootstrap confidence intervals
//!
//! Convenience entry points that wire the default collaborators - the
//! statrs-backed registry and the closed-form estimator - into the engine.

use crate::bootstrap::{BootstrapCi, BootstrapConfig, BootstrapReport};
use bootfit_core::{
    ClosedFormEstimator, Family, FitMethod, FittedModel, ModelEstimator, Result, StatrsRegistry,
};

/// Default number of bootstrap replicates
pub const DEFAULT_REPLICATES: usize = 2000;

/// Fast number of replicates for quick estimates
pub const FAST_REPLICATES: usize = 500;

/// High-precision number of replicates
pub const HIGH_PRECISION_REPLICATES: usize = 10000;

/// Compute bootstrap confidence intervals for a fitted model
///
/// Uses the statrs registry for parametric generation and the closed-form
/// estimator for refits.
///
/// # Example
/// ```rust
/// use bootfit_confidence::{bootstrap_ci, BootstrapConfig, ResampleMode};
/// use bootfit_core::{ClosedFormEstimator, Family, FitMethod, FittedModel, ModelEstimator};
///
/// let sample: Vec<f64> = (0..100).map(|i| 2.0 + (i % 9) as f64 * 0.25).collect();
/// let estimate = ClosedFormEstimator
///     .fit(&sample, Family::Normal, FitMethod::MaximumLikelihood)
///     .unwrap();
/// let model = FittedModel::new(sample, Family::Normal, FitMethod::MaximumLikelihood, estimate)
///     .unwrap();
///
/// let config = BootstrapConfig {
///     mode: ResampleMode::NonParametric,
///     replicate_count: 200,
///     seed: Some(7),
///     ..BootstrapConfig::default()
/// };
/// let report = bootstrap_ci(&model, config).unwrap();
/// assert_eq!(report.intervals.len(), 2);
/// ```
pub fn bootstrap_ci(model: &FittedModel, config: BootstrapConfig) -> Result<BootstrapReport> {
    BootstrapCi::new(StatrsRegistry, ClosedFormEstimator)
        .with_config(config)
        .run(model)
}

/// Fit a family to a sample, then bootstrap the fit
///
/// Convenience for the common case where the caller has raw observations
/// rather than an upstream [`FittedModel`]. The original fit failing is a
/// hard error - there is no model to bootstrap around.
pub fn fit_and_bootstrap(
    sample: Vec<f64>,
    family: Family,
    method: FitMethod,
    config: BootstrapConfig,
) -> Result<BootstrapReport> {
    let estimate = ClosedFormEstimator.fit(&sample, family, method)?;
    let model = FittedModel::new(sample, family, method, estimate)?;
    bootstrap_ci(&model, config)
}
