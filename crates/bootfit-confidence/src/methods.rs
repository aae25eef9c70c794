//! Interval construction from the replicate distribution
//!
//! Two methods over the surviving replicate column of each parameter:
//! plain percentile, and BCa (bias-corrected and accelerated) which adjusts
//! the percentile endpoints using a bias-correction constant from the
//! replicate distribution and an acceleration constant from jackknife
//! leave-one-out estimates.
//!
//! BCa reference: Efron (1987), "Better Bootstrap Confidence Intervals".

use crate::replicate::ReplicateMatrix;
use crate::types::{BootstrapWarning, ConfidenceInterval, IntervalReport, ResampleMode};
use bootfit_core::{Error, Parameters, Result};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, warn};

/// Adjusted BCa probabilities (and degenerate z0 proportions) are clamped
/// into this range before being used as empirical quantiles.
const PROB_FLOOR: f64 = 0.001;
const PROB_CEIL: f64 = 0.999;

/// Guard added to the acceleration denominator so coincident jackknife
/// estimates yield a ≈ 0 rather than a division by zero.
const ACCEL_EPS: f64 = 1e-10;

/// Below this many surviving replicates an interval is flagged unreliable.
const MIN_SURVIVING: usize = 10;

fn std_normal() -> Normal {
    // Safe by construction for mean=0, sigma=1.
    Normal::new(0.0, 1.0).expect("standard normal should be constructible")
}

/// Empirical quantile of sorted data via linear interpolation
///
/// `p` is clamped to [0, 1]; `p=0` returns the minimum, `p=1` the maximum.
pub fn empirical_quantile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let p = p.clamp(0.0, 1.0);
    let pos = p * (sorted.len() - 1) as f64;
    let i = pos.floor() as usize;
    let j = pos.ceil() as usize;
    if i == j {
        return sorted[i];
    }
    let t = pos - i as f64;
    (1.0 - t) * sorted[i] + t * sorted[j]
}

fn sorted_column(column: &[f64]) -> Result<Vec<f64>> {
    if column.is_empty() {
        return Err(Error::empty_input());
    }
    let mut sorted = column.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Percentile interval from the surviving replicate column
pub fn percentile_interval(
    column: &[f64],
    estimate: f64,
    confidence_level: f64,
) -> Result<ConfidenceInterval> {
    let sorted = sorted_column(column)?;

    let alpha = 1.0 - confidence_level;
    let lower = empirical_quantile(&sorted, alpha / 2.0);
    let upper = empirical_quantile(&sorted, 1.0 - alpha / 2.0);

    Ok(ConfidenceInterval::new(
        lower,
        upper,
        estimate,
        confidence_level,
    ))
}

/// BCa-adjusted probability for one endpoint
fn bca_adjusted_probability(z0: f64, accel: f64, z_alpha: f64) -> f64 {
    let t = z0 + z_alpha;
    let p = std_normal().cdf(z0 + t / (1.0 - accel * t));
    p.clamp(PROB_FLOOR, PROB_CEIL)
}

/// BCa interval from the replicate column and jackknife estimates
pub fn bca_interval(
    column: &[f64],
    jackknife: &[f64],
    estimate: f64,
    confidence_level: f64,
) -> Result<ConfidenceInterval> {
    let sorted = sorted_column(column)?;

    // Bias correction: the normal quantile of the fraction of replicates
    // below the point estimate. The fraction is clamped so a one-sided
    // replicate distribution keeps z0 finite.
    let z0 = {
        let below = sorted.iter().filter(|&&x| x < estimate).count() as f64;
        let proportion = (below / sorted.len() as f64).clamp(PROB_FLOOR, PROB_CEIL);
        std_normal().inverse_cdf(proportion)
    };

    // Acceleration from the jackknife spread around its mean
    let accel = {
        let jack_mean = jackknife.iter().sum::<f64>() / jackknife.len() as f64;
        let mut sum_sq = 0.0;
        let mut sum_cu = 0.0;
        for &v in jackknife {
            let d = jack_mean - v;
            sum_sq += d * d;
            sum_cu += d * d * d;
        }
        sum_cu / (6.0 * sum_sq.powf(1.5) + ACCEL_EPS)
    };

    debug!(z0, accel, "bca correction factors");

    let alpha = 1.0 - confidence_level;
    let p_lower = bca_adjusted_probability(z0, accel, std_normal().inverse_cdf(alpha / 2.0));
    let p_upper = bca_adjusted_probability(z0, accel, std_normal().inverse_cdf(1.0 - alpha / 2.0));

    let lo = empirical_quantile(&sorted, p_lower);
    let hi = empirical_quantile(&sorted, p_upper);

    Ok(ConfidenceInterval::new(
        lo.min(hi),
        lo.max(hi),
        estimate,
        confidence_level,
    ))
}

/// Per-parameter intervals from the replicate matrix
///
/// Failed rows are discarded column-wise; a parameter with no surviving
/// replicates is a hard error, one with fewer than [`MIN_SURVIVING`] gets a
/// reliability warning but still reports its interval.
pub fn compute_intervals(
    matrix: &ReplicateMatrix,
    point_estimate: &Parameters,
    confidence_level: f64,
    mode: ResampleMode,
    jackknife: Option<&ReplicateMatrix>,
) -> Result<(IntervalReport, Vec<BootstrapWarning>)> {
    if mode == ResampleMode::Bca && jackknife.is_none() {
        return Err(Error::InvalidInput(
            "BCa intervals require jackknife estimates".to_string(),
        ));
    }

    let mut report = IntervalReport::new();
    let mut warnings = Vec::new();

    for (j, name) in matrix.parameter_names().iter().enumerate() {
        let column = matrix.surviving_column(j);
        if column.is_empty() {
            return Err(Error::Estimation(format!(
                "no surviving replicates for parameter {name}"
            )));
        }
        if column.len() < MIN_SURVIVING {
            warn!(
                parameter = name.as_str(),
                surviving = column.len(),
                "too few surviving replicates; interval is unreliable"
            );
            warnings.push(BootstrapWarning::InsufficientReplicates {
                parameter: name.clone(),
                surviving: column.len(),
            });
        }

        let estimate = point_estimate.get(name).ok_or_else(|| {
            Error::InvalidInput(format!("point estimate missing parameter {name}"))
        })?;

        let interval = match (mode, jackknife) {
            (ResampleMode::Bca, Some(jack)) => bca_interval(
                &column,
                &jack.surviving_column(j),
                estimate,
                confidence_level,
            )?,
            _ => percentile_interval(&column, estimate, confidence_level)?,
        };
        report.insert(name.clone(), interval);
    }

    Ok((report, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empirical_quantile_edges() {
        let s = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(empirical_quantile(&s, 0.0), 1.0);
        assert_relative_eq!(empirical_quantile(&s, 1.0), 5.0);
        assert_relative_eq!(empirical_quantile(&s, 0.5), 3.0);
        assert_relative_eq!(empirical_quantile(&s, 0.25), 2.0);
        assert_relative_eq!(empirical_quantile(&s, 0.625), 3.5);

        assert_relative_eq!(empirical_quantile(&[7.0], 0.3), 7.0);
        assert!(empirical_quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_percentile_interval_symmetric() {
        let column: Vec<f64> = (0..=100).map(|i| i as f64 / 10.0).collect();
        let ci = percentile_interval(&column, 5.0, 0.90).unwrap();

        assert_relative_eq!(ci.lower, 0.5);
        assert_relative_eq!(ci.upper, 9.5);
        assert_eq!(ci.estimate, 5.0);
        assert!(ci.contains(5.0));
    }

    #[test]
    fn test_percentile_interval_empty_column() {
        assert!(percentile_interval(&[], 1.0, 0.95).is_err());
    }

    #[test]
    fn test_bca_reduces_to_percentile_when_unbiased_and_symmetric() {
        // Centered replicate distribution, coincident jackknife estimates:
        // z0 ≈ 0 (half the replicates below the estimate) and a ≈ 0.
        let column: Vec<f64> = (-50..=50).map(|i| 5.0 + i as f64 * 0.01).collect();
        let jackknife = vec![5.0; 20];

        let bca = bca_interval(&column, &jackknife, 5.0, 0.95).unwrap();
        let pct = percentile_interval(&column, 5.0, 0.95).unwrap();

        assert_relative_eq!(bca.lower, pct.lower, epsilon = 0.01);
        assert_relative_eq!(bca.upper, pct.upper, epsilon = 0.01);
    }

    #[test]
    fn test_bca_degenerate_jackknife_acceleration_is_zero() {
        let jackknife = vec![2.0; 10];
        let jack_mean = 2.0;
        let mut sum_sq = 0.0;
        let mut sum_cu = 0.0;
        for &v in &jackknife {
            let d: f64 = jack_mean - v;
            sum_sq += d * d;
            sum_cu += d * d * d;
        }
        let accel = sum_cu / (6.0 * sum_sq.powf(1.5) + ACCEL_EPS);
        assert_eq!(accel, 0.0);
    }

    #[test]
    fn test_bca_shifts_toward_bias() {
        // Most replicates sit above the point estimate, so the proportion
        // below it is small, z0 < 0, and both endpoints move downward
        // relative to plain percentiles.
        let column: Vec<f64> = (0..100).map(|i| 5.0 + i as f64 * 0.01).collect();
        let jackknife: Vec<f64> = (0..20).map(|i| 5.4 + i as f64 * 0.001).collect();

        let bca = bca_interval(&column, &jackknife, 5.1, 0.90).unwrap();
        let pct = percentile_interval(&column, 5.1, 0.90).unwrap();

        assert!(bca.lower <= pct.lower);
        assert!(bca.upper <= pct.upper);
    }

    #[test]
    fn test_bca_one_sided_replicates_stay_finite() {
        // Every replicate above the estimate: the z0 proportion degenerates
        // to zero and must be clamped, not become -inf.
        let column: Vec<f64> = (1..=50).map(|i| 10.0 + i as f64).collect();
        let jackknife: Vec<f64> = (0..10).map(|i| 10.0 + i as f64 * 0.1).collect();

        let ci = bca_interval(&column, &jackknife, 5.0, 0.95).unwrap();
        assert!(ci.lower.is_finite());
        assert!(ci.upper.is_finite());
        assert!(ci.lower <= ci.upper);
    }

    #[test]
    fn test_compute_intervals_warns_on_thin_columns() {
        let names = vec!["rate".to_string()];
        let mut rows = vec![vec![0.5], vec![0.6], vec![0.4]];
        rows.extend(std::iter::repeat(ReplicateMatrix::failure_row(1)).take(7));
        let matrix = ReplicateMatrix::new(names, rows);
        let estimate = Parameters::from_pairs(&[("rate", 0.5)]);

        let (report, warnings) = compute_intervals(
            &matrix,
            &estimate,
            0.95,
            ResampleMode::NonParametric,
            None,
        )
        .unwrap();

        assert_eq!(report.len(), 1);
        assert!(matches!(
            warnings[0],
            BootstrapWarning::InsufficientReplicates { surviving: 3, .. }
        ));
    }

    #[test]
    fn test_compute_intervals_fails_without_survivors() {
        let names = vec!["rate".to_string()];
        let rows = vec![ReplicateMatrix::failure_row(1); 5];
        let matrix = ReplicateMatrix::new(names, rows);
        let estimate = Parameters::from_pairs(&[("rate", 0.5)]);

        let result = compute_intervals(
            &matrix,
            &estimate,
            0.95,
            ResampleMode::NonParametric,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_compute_intervals_bca_requires_jackknife() {
        let names = vec!["rate".to_string()];
        let matrix = ReplicateMatrix::new(names, vec![vec![0.5]; 20]);
        let estimate = Parameters::from_pairs(&[("rate", 0.5)]);

        let result = compute_intervals(&matrix, &estimate, 0.95, ResampleMode::Bca, None);
        assert!(result.is_err());
    }
}
