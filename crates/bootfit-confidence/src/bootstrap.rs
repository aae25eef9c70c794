//! Bootstrap orchestrator
//!
//! The public entry point of the engine: validates the configuration,
//! selects the replicate-generation mode and execution engine once, drives
//! the iteration batch, and packages the interval report. Each iteration is
//! a pure function of its index - its random stream is seeded from the run
//! seed plus the iteration number - so sequential and parallel execution
//! produce the same replicate matrix for a fixed seed.

use crate::jackknife::jackknife_estimates;
use crate::methods::compute_intervals;
use crate::replicate::{generate_replicate, ReplicateMatrix};
use crate::types::{BootstrapWarning, IntervalReport, ResampleMode};
use bootfit_core::{
    DistributionRegistry, Error, ExecutionEngine, FittedModel, ModelEstimator, ParallelEngine,
    Result, SequentialEngine, WorkerCount,
};
use rand::prelude::*;
use tracing::{debug, instrument, warn};

/// Success rate below which a completed run carries a convergence warning.
const CONVERGENCE_WARN_THRESHOLD: f64 = 0.95;

/// Configuration for a bootstrap run
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Replicate-generation mode (and interval method for BCa)
    pub mode: ResampleMode,
    /// Number of bootstrap iterations; must be positive
    pub replicate_count: usize,
    /// Confidence level in (0, 1)
    pub confidence_level: f64,
    /// Distribute iterations across workers
    pub parallel: bool,
    /// Worker-count selection for parallel execution
    pub workers: WorkerCount,
    /// Seed for the replicate sequence; derived from entropy when absent
    pub seed: Option<u64>,
    /// Retain the replicate matrix in the report for diagnostics
    pub keep_replicates: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            mode: ResampleMode::NonParametric,
            replicate_count: 2000,
            confidence_level: 0.95,
            parallel: false,
            workers: WorkerCount::Auto,
            seed: None,
            keep_replicates: false,
        }
    }
}

impl BootstrapConfig {
    /// Reject invalid configurations before any computation
    pub fn validate(&self) -> Result<()> {
        if self.replicate_count == 0 {
            return Err(Error::InvalidParameter(
                "replicate count must be positive".to_string(),
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "confidence level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }
        self.workers.validate()
    }
}

/// Result of a completed bootstrap run
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// The original point estimates, unchanged
    pub point_estimate: bootfit_core::Parameters,
    /// Per-parameter confidence intervals
    pub intervals: IntervalReport,
    /// Mode the run used
    pub mode: ResampleMode,
    /// Number of iterations scheduled
    pub replicate_count: usize,
    /// Confidence level of the intervals
    pub confidence_level: f64,
    /// Successful iterations as a fraction of all iterations
    pub convergence_rate: f64,
    /// Reliability conditions observed during the run
    pub warnings: Vec<BootstrapWarning>,
    /// The replicate matrix, retained only when the config asks for it
    pub replicates: Option<ReplicateMatrix>,
}

/// Bootstrap confidence-interval engine
///
/// Parameterized over the distribution registry (used by parametric
/// generation) and the estimation module (used by every refit), both
/// resolved here once rather than re-dispatched per iteration.
#[derive(Clone)]
pub struct BootstrapCi<Reg, Est> {
    registry: Reg,
    estimator: Est,
    config: BootstrapConfig,
}

impl<Reg, Est> BootstrapCi<Reg, Est>
where
    Reg: DistributionRegistry,
    Est: ModelEstimator,
{
    /// Create an engine with the default configuration
    pub fn new(registry: Reg, estimator: Est) -> Self {
        Self {
            registry,
            estimator,
            config: BootstrapConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the replicate-generation mode
    pub fn with_mode(mut self, mode: ResampleMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the number of bootstrap iterations
    pub fn with_replicates(mut self, replicate_count: usize) -> Self {
        self.config.replicate_count = replicate_count;
        self
    }

    /// Set the confidence level
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.config.confidence_level = confidence_level;
        self
    }

    /// Set the seed for a reproducible replicate sequence
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Distribute iterations across `workers`
    pub fn parallel(mut self, workers: WorkerCount) -> Self {
        self.config.parallel = true;
        self.config.workers = workers;
        self
    }

    /// Retain the replicate matrix in the report
    pub fn keep_replicates(mut self, keep: bool) -> Self {
        self.config.keep_replicates = keep;
        self
    }

    /// Run the bootstrap and construct per-parameter intervals
    ///
    /// Configuration errors fail the call before any iteration runs;
    /// individual replicate failures are recovered into sentinel rows. The
    /// call fails only if the configuration is invalid or no replicate
    /// survived at all.
    #[instrument(skip(self, model), fields(
        family = %model.family(),
        n = model.sample_size(),
        mode = %self.config.mode,
        replicates = self.config.replicate_count,
    ))]
    pub fn run(&self, model: &FittedModel) -> Result<BootstrapReport> {
        self.config.validate()?;

        let seed = self.config.seed.unwrap_or_else(|| thread_rng().gen());

        if self.config.parallel {
            let engine = ParallelEngine::with_workers(self.config.workers.resolve())?;
            self.run_with_engine(model, &engine, seed)
        } else {
            self.run_with_engine(model, &SequentialEngine::new(), seed)
        }
    }

    fn run_with_engine<E: ExecutionEngine>(
        &self,
        model: &FittedModel,
        engine: &E,
        seed: u64,
    ) -> Result<BootstrapReport> {
        let mode = self.config.mode;
        let family = model.family();
        let method = model.method();
        let param_count = family.param_names().len();

        debug!(
            workers = engine.num_workers(),
            "dispatching {} bootstrap iterations",
            self.config.replicate_count
        );

        let rows = engine.run_batch(self.config.replicate_count, |i| {
            // Each iteration owns an independently seeded stream, keyed by
            // its index, so the replicate set does not depend on worker
            // scheduling.
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));

            let replicate = match generate_replicate(model, mode, &self.registry, &mut rng) {
                Ok(replicate) => replicate,
                Err(err) => {
                    debug!(iteration = i, %err, "replicate generation failed");
                    return ReplicateMatrix::failure_row(param_count);
                }
            };

            match self.estimator.fit(&replicate, family, method) {
                Ok(params) if family.validate_params(&params).is_ok() => params.values(),
                Ok(_) | Err(_) => ReplicateMatrix::failure_row(param_count),
            }
        });

        let names = family.param_names().iter().map(|s| s.to_string()).collect();
        let matrix = ReplicateMatrix::new(names, rows);

        if matrix.success_count() == 0 {
            return Err(Error::Estimation(format!(
                "all {} replicate fits failed",
                matrix.n_replicates()
            )));
        }

        let jackknife = match mode {
            ResampleMode::Bca => Some(jackknife_estimates(model, &self.estimator, engine)),
            _ => None,
        };

        let (intervals, mut warnings) = compute_intervals(
            &matrix,
            model.estimate(),
            self.config.confidence_level,
            mode,
            jackknife.as_ref(),
        )?;

        let convergence_rate = matrix.convergence_rate();
        if convergence_rate < CONVERGENCE_WARN_THRESHOLD {
            warn!(
                rate = convergence_rate,
                "replicate convergence below threshold"
            );
            warnings.push(BootstrapWarning::LowConvergence {
                rate: convergence_rate,
            });
        }

        Ok(BootstrapReport {
            point_estimate: model.estimate().clone(),
            intervals,
            mode,
            replicate_count: self.config.replicate_count,
            confidence_level: self.config.confidence_level,
            convergence_rate,
            warnings,
            replicates: self.config.keep_replicates.then_some(matrix),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootfit_core::{ClosedFormEstimator, Family, FitMethod, Parameters, StatrsRegistry};

    fn normal_model() -> FittedModel {
        let sample: Vec<f64> = (0..60).map(|i| 5.0 + ((i * 7) % 11) as f64 * 0.2).collect();
        let estimate = ClosedFormEstimator
            .fit(&sample, Family::Normal, FitMethod::MaximumLikelihood)
            .unwrap();
        FittedModel::new(
            sample,
            Family::Normal,
            FitMethod::MaximumLikelihood,
            estimate,
        )
        .unwrap()
    }

    #[test]
    fn test_config_validation() {
        let config = BootstrapConfig::default();
        assert!(config.validate().is_ok());

        let config = BootstrapConfig {
            replicate_count: 0,
            ..BootstrapConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BootstrapConfig {
            confidence_level: 1.0,
            ..BootstrapConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BootstrapConfig {
            confidence_level: -0.5,
            ..BootstrapConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BootstrapConfig {
            parallel: true,
            workers: WorkerCount::Fixed(0),
            ..BootstrapConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_run_rejects_invalid_config_before_work() {
        let model = normal_model();
        let result = BootstrapCi::new(StatrsRegistry, ClosedFormEstimator)
            .with_replicates(0)
            .run(&model);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_nonparametric_run_produces_centered_intervals() {
        let model = normal_model();
        let report = BootstrapCi::new(StatrsRegistry, ClosedFormEstimator)
            .with_replicates(300)
            .with_seed(11)
            .run(&model)
            .unwrap();

        assert_eq!(report.replicate_count, 300);
        assert_eq!(report.convergence_rate, 1.0);
        assert!(report.warnings.is_empty());
        assert!(report.replicates.is_none());

        for (name, ci) in report.intervals.iter() {
            let estimate = model.estimate().get(name).unwrap();
            assert_eq!(ci.estimate, estimate);
            assert!(ci.lower <= estimate && estimate <= ci.upper);
        }
    }

    #[test]
    fn test_parametric_run() {
        let model = normal_model();
        let report = BootstrapCi::new(StatrsRegistry, ClosedFormEstimator)
            .with_mode(ResampleMode::Parametric)
            .with_replicates(200)
            .with_seed(23)
            .run(&model)
            .unwrap();

        assert_eq!(report.mode, ResampleMode::Parametric);
        assert_eq!(report.convergence_rate, 1.0);
        assert!(report.intervals.get("mean").is_some());
        assert!(report.intervals.get("sd").is_some());
    }

    #[test]
    fn test_bca_run() {
        let model = normal_model();
        let report = BootstrapCi::new(StatrsRegistry, ClosedFormEstimator)
            .with_mode(ResampleMode::Bca)
            .with_replicates(200)
            .with_seed(5)
            .run(&model)
            .unwrap();

        assert_eq!(report.mode, ResampleMode::Bca);
        let ci = report.intervals.get("mean").unwrap();
        assert!(ci.lower <= ci.estimate && ci.estimate <= ci.upper);
    }

    #[test]
    fn test_keep_replicates() {
        let model = normal_model();
        let report = BootstrapCi::new(StatrsRegistry, ClosedFormEstimator)
            .with_replicates(50)
            .with_seed(3)
            .keep_replicates(true)
            .run(&model)
            .unwrap();

        let matrix = report.replicates.unwrap();
        assert_eq!(matrix.n_replicates(), 50);
        assert_eq!(matrix.n_params(), 2);
    }

    #[test]
    fn test_all_failures_is_hard_error() {
        struct NeverConverges;
        impl ModelEstimator for NeverConverges {
            fn fit(
                &self,
                _: &[f64],
                _: Family,
                _: FitMethod,
            ) -> Result<Parameters> {
                Err(Error::Estimation("did not converge".to_string()))
            }
        }

        let model = normal_model();
        let result = BootstrapCi::new(StatrsRegistry, NeverConverges)
            .with_replicates(20)
            .with_seed(1)
            .run(&model);
        assert!(matches!(result, Err(Error::Estimation(_))));
    }

    #[test]
    fn test_ill_keyed_fit_results_become_failure_rows() {
        // An estimator that returns parameters under the wrong schema:
        // the orchestrator must sentinel those rows, not trust them.
        struct WrongSchema;
        impl ModelEstimator for WrongSchema {
            fn fit(
                &self,
                sample: &[f64],
                family: Family,
                method: FitMethod,
            ) -> Result<Parameters> {
                if sample.len() % 2 == 0 {
                    Ok(Parameters::from_pairs(&[("mu", 0.0), ("sigma", 1.0)]))
                } else {
                    ClosedFormEstimator.fit(sample, family, method)
                }
            }
        }

        let model = normal_model(); // even sample size: every fit ill-keyed
        let result = BootstrapCi::new(StatrsRegistry, WrongSchema)
            .with_replicates(10)
            .with_seed(2)
            .run(&model);
        assert!(result.is_err());
    }
}
