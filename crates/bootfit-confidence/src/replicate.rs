//! Replicate generation and the replicate matrix
//!
//! One bootstrap iteration produces one replicate dataset of the same size
//! as the original sample, either drawn from the fitted distribution
//! (parametric) or resampled with replacement from the observations
//! (non-parametric). Results accumulate into a [`ReplicateMatrix`] whose
//! rows are indexed by iteration number; a failed iteration leaves an
//! all-NaN sentinel row instead of aborting the run.

use crate::types::ResampleMode;
use bootfit_core::{DistributionRegistry, FittedModel, Result};
use rand::Rng;

/// Resample `sample` with replacement, producing a dataset of the same size
///
/// Cannot fail for a non-empty sample.
pub fn resample_with_replacement<R: Rng + ?Sized>(sample: &[f64], rng: &mut R) -> Vec<f64> {
    let n = sample.len();
    (0..n).map(|_| sample[rng.gen_range(0..n)]).collect()
}

/// Produce one replicate dataset for `model` under `mode`
///
/// Parametric generation draws from the registry at the point estimates and
/// propagates registry failures; the non-parametric path (also used by BCa)
/// always succeeds.
pub fn generate_replicate<Reg, R>(
    model: &FittedModel,
    mode: ResampleMode,
    registry: &Reg,
    rng: &mut R,
) -> Result<Vec<f64>>
where
    Reg: DistributionRegistry,
    R: Rng + ?Sized,
{
    match mode {
        ResampleMode::Parametric => registry.sample_n(
            model.family(),
            model.estimate(),
            model.sample_size(),
            rng,
        ),
        ResampleMode::NonParametric | ResampleMode::Bca => {
            Ok(resample_with_replacement(model.sample(), rng))
        }
    }
}

/// Replicate-by-parameter estimate table
///
/// Row `i` holds the parameter estimates from iteration `i` regardless of
/// completion order; a failed iteration is a row of NaN. Row order carries
/// no meaning beyond that attribution, and all column operations are
/// order-independent.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicateMatrix {
    parameter_names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ReplicateMatrix {
    /// Build from iteration-indexed rows
    ///
    /// Every row must have one entry per parameter name.
    pub fn new(parameter_names: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == parameter_names.len()));
        Self {
            parameter_names,
            rows,
        }
    }

    /// The all-NaN sentinel row for a failed iteration
    pub fn failure_row(parameter_count: usize) -> Vec<f64> {
        vec![f64::NAN; parameter_count]
    }

    pub fn n_replicates(&self) -> usize {
        self.rows.len()
    }

    pub fn n_params(&self) -> usize {
        self.parameter_names.len()
    }

    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    /// The estimates from iteration `i`
    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    /// Whether iteration `i` failed to produce estimates
    pub fn is_failure_row(&self, i: usize) -> bool {
        self.rows[i].iter().all(|v| v.is_nan())
    }

    /// Finite values of column `j`, failed rows discarded
    pub fn surviving_column(&self, j: usize) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row[j])
            .filter(|v| v.is_finite())
            .collect()
    }

    /// Number of iterations whose every parameter estimate is finite
    pub fn success_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.iter().all(|v| v.is_finite()))
            .count()
    }

    /// Successful iterations as a fraction of all iterations
    pub fn convergence_rate(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.success_count() as f64 / self.rows.len() as f64
    }
}
