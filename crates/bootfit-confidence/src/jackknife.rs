//! Leave-one-out (jackknife) re-estimation
//!
//! The BCa acceleration factor is computed from n leave-one-out refits of
//! the original sample. The pass is an independent O(n) workload and runs
//! through the same execution-engine abstraction as the main bootstrap
//! loop.

use crate::replicate::ReplicateMatrix;
use bootfit_core::{ExecutionEngine, FittedModel, ModelEstimator};
use tracing::{debug, instrument};

/// The original sample with observation `omit` removed
fn leave_one_out(sample: &[f64], omit: usize) -> Vec<f64> {
    let mut reduced = Vec::with_capacity(sample.len() - 1);
    reduced.extend_from_slice(&sample[..omit]);
    reduced.extend_from_slice(&sample[omit + 1..]);
    reduced
}

/// Refit the model once per left-out observation
///
/// Entry `i` of the result is the estimate with observation `i` removed. A
/// leave-one-out fit that fails substitutes the original point estimate,
/// which pushes the acceleration term toward zero instead of propagating
/// the failure.
#[instrument(skip(model, estimator, engine), fields(n = model.sample_size()))]
pub fn jackknife_estimates<Est, E>(
    model: &FittedModel,
    estimator: &Est,
    engine: &E,
) -> ReplicateMatrix
where
    Est: ModelEstimator,
    E: ExecutionEngine,
{
    let n = model.sample_size();
    let family = model.family();
    let method = model.method();
    let fallback = model.estimate().values();

    debug!("running {} leave-one-out refits", n);

    let rows = engine.run_batch(n, |i| {
        let reduced = leave_one_out(model.sample(), i);
        match estimator.fit(&reduced, family, method) {
            Ok(params) if family.validate_params(&params).is_ok() => params.values(),
            _ => fallback.clone(),
        }
    });

    let names = family
        .param_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    ReplicateMatrix::new(names, rows)
}
