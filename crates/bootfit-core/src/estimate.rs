//! Parameter estimation interface
//!
//! The bootstrap engine refits the model once per replicate through
//! [`ModelEstimator`], a capability interface resolved once at orchestration
//! entry. [`ClosedFormEstimator`] is the reference implementation: closed
//! forms where the family has them, the explicit Minka approximation for the
//! gamma likelihood. An iterative optimizer can be plugged in behind the
//! same trait.

use crate::{Error, Family, FitMethod, Parameters, Result};

/// Capability interface onto the parameter-estimation module
///
/// Implementations must be free of shared mutable state: `fit` is called
/// concurrently from parallel workers.
pub trait ModelEstimator: Send + Sync {
    /// Fit `family` to `sample` with `method`, returning named estimates
    ///
    /// Non-convergence, out-of-support observations, and degenerate samples
    /// are all [`Error::Estimation`] - the caller decides whether that is
    /// fatal (original fit) or recoverable (a bootstrap replicate).
    fn fit(&self, sample: &[f64], family: Family, method: FitMethod) -> Result<Parameters>;
}

/// Closed-form reference estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedFormEstimator;

fn mean(sample: &[f64]) -> f64 {
    sample.iter().sum::<f64>() / sample.len() as f64
}

/// Location/scale moments with ML (`/n`) or unbiased (`/(n-1)`) variance
fn location_scale(sample: &[f64], method: FitMethod) -> Result<(f64, f64)> {
    if sample.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: sample.len(),
        });
    }
    let m = mean(sample);
    let sum_sq: f64 = sample.iter().map(|x| (x - m).powi(2)).sum();
    let denom = match method {
        FitMethod::MaximumLikelihood => sample.len() as f64,
        FitMethod::Moments => (sample.len() - 1) as f64,
    };
    let sd = (sum_sq / denom).sqrt();
    if !(sd > 0.0) {
        return Err(Error::Estimation(
            "sample is degenerate (zero variance)".to_string(),
        ));
    }
    Ok((m, sd))
}

fn require_positive(sample: &[f64], family: Family) -> Result<()> {
    if sample.iter().any(|&x| x <= 0.0) {
        return Err(Error::Estimation(format!(
            "{family} requires strictly positive observations"
        )));
    }
    Ok(())
}

fn fit_normal(sample: &[f64], method: FitMethod) -> Result<Parameters> {
    let (m, sd) = location_scale(sample, method)?;
    Ok(Parameters::from_pairs(&[("mean", m), ("sd", sd)]))
}

fn fit_lognormal(sample: &[f64], method: FitMethod) -> Result<Parameters> {
    require_positive(sample, Family::LogNormal)?;
    let logs: Vec<f64> = sample.iter().map(|x| x.ln()).collect();
    let (m, sd) = location_scale(&logs, method)?;
    Ok(Parameters::from_pairs(&[("meanlog", m), ("sdlog", sd)]))
}

fn fit_exponential(sample: &[f64]) -> Result<Parameters> {
    if sample.is_empty() {
        return Err(Error::empty_input());
    }
    if sample.iter().any(|&x| x < 0.0) {
        return Err(Error::Estimation(
            "exponential requires non-negative observations".to_string(),
        ));
    }
    let m = mean(sample);
    if !(m > 0.0) {
        return Err(Error::Estimation(
            "sample mean must be positive".to_string(),
        ));
    }
    Ok(Parameters::from_pairs(&[("rate", 1.0 / m)]))
}

fn fit_gamma(sample: &[f64], method: FitMethod) -> Result<Parameters> {
    require_positive(sample, Family::Gamma)?;
    if sample.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: sample.len(),
        });
    }
    let m = mean(sample);

    let (shape, rate) = match method {
        FitMethod::Moments => {
            let var = sample.iter().map(|x| (x - m).powi(2)).sum::<f64>()
                / (sample.len() - 1) as f64;
            if !(var > 0.0) {
                return Err(Error::Estimation(
                    "sample is degenerate (zero variance)".to_string(),
                ));
            }
            (m * m / var, m / var)
        }
        FitMethod::MaximumLikelihood => {
            // Explicit approximation to the ML shape (Minka 2002); exact for
            // the first two terms of the likelihood expansion.
            let mean_log = mean(&sample.iter().map(|x| x.ln()).collect::<Vec<_>>());
            let s = m.ln() - mean_log;
            if !(s > 0.0) {
                return Err(Error::Estimation(
                    "log-moment spread is degenerate".to_string(),
                ));
            }
            let shape = (3.0 - s + ((s - 3.0).powi(2) + 24.0 * s).sqrt()) / (12.0 * s);
            (shape, shape / m)
        }
    };

    if !(shape.is_finite() && rate.is_finite() && shape > 0.0 && rate > 0.0) {
        return Err(Error::Estimation(
            "gamma estimates are out of range".to_string(),
        ));
    }
    Ok(Parameters::from_pairs(&[("shape", shape), ("rate", rate)]))
}

impl ModelEstimator for ClosedFormEstimator {
    fn fit(&self, sample: &[f64], family: Family, method: FitMethod) -> Result<Parameters> {
        if sample.iter().any(|x| !x.is_finite()) {
            return Err(Error::non_finite("sample"));
        }
        match family {
            Family::Normal => fit_normal(sample, method),
            Family::LogNormal => fit_lognormal(sample, method),
            Family::Exponential => fit_exponential(sample),
            Family::Gamma => fit_gamma(sample, method),
        }
    }
}
