//! Common types for bootstrap confidence intervals

use std::fmt;

/// Replicate-generation mode
///
/// A closed set, resolved once at orchestration entry. BCa is not a
/// distinct data-generation mode - it reuses the non-parametric replicate
/// distribution and layers a bias/acceleration correction on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleMode {
    /// Draw replicates from the fitted distribution at the point estimates
    Parametric,
    /// Resample the original observations with replacement
    NonParametric,
    /// Non-parametric replicates with bias-corrected-and-accelerated intervals
    Bca,
}

impl fmt::Display for ResampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleMode::Parametric => f.write_str("parametric"),
            ResampleMode::NonParametric => f.write_str("nonparametric"),
            ResampleMode::Bca => f.write_str("bca"),
        }
    }
}

/// A confidence interval with lower and upper bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// The point estimate (center of interval)
    pub estimate: f64,
    /// Confidence level (e.g., 0.95 for 95% CI)
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Create a new confidence interval
    pub fn new(lower: f64, upper: f64, estimate: f64, confidence_level: f64) -> Self {
        Self {
            lower,
            upper,
            estimate,
            confidence_level,
        }
    }

    /// Width of the confidence interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% CI: [{}, {}], estimate: {}",
            self.confidence_level * 100.0,
            self.lower,
            self.upper,
            self.estimate
        )
    }
}

/// Ordered per-parameter interval report
///
/// Entries follow the family's parameter schema order; every interval
/// carries the original point estimate unchanged as its center value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalReport {
    entries: Vec<(String, ConfidenceInterval)>,
}

impl IntervalReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interval for a parameter
    pub fn insert(&mut self, name: impl Into<String>, interval: ConfidenceInterval) {
        self.entries.push((name.into(), interval));
    }

    /// Look up the interval for a parameter by name
    pub fn get(&self, name: &str) -> Option<&ConfidenceInterval> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ci)| ci)
    }

    /// Iterate over (name, interval) pairs in parameter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfidenceInterval)> {
        self.entries.iter().map(|(n, ci)| (n.as_str(), ci))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Non-fatal reliability conditions attached to a completed report
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapWarning {
    /// Fewer than the minimum surviving replicates for a parameter; the
    /// interval is returned but statistically unreliable
    InsufficientReplicates { parameter: String, surviving: usize },
    /// Overall replicate success rate fell below the reliability threshold
    LowConvergence { rate: f64 },
}

impl fmt::Display for BootstrapWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapWarning::InsufficientReplicates {
                parameter,
                surviving,
            } => write!(
                f,
                "only {surviving} replicates survived for parameter {parameter}; interval is unreliable"
            ),
            BootstrapWarning::LowConvergence { rate } => {
                write!(f, "replicate convergence rate {:.1}% is low", rate * 100.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_interval() {
        let ci = ConfidenceInterval::new(2.0, 8.0, 5.0, 0.95);

        assert_eq!(ci.width(), 6.0);
        assert!(ci.contains(5.0));
        assert!(ci.contains(2.0));
        assert!(!ci.contains(1.0));
        assert!(!ci.contains(9.0));
    }

    #[test]
    fn test_confidence_interval_display() {
        let ci = ConfidenceInterval::new(2.5, 7.5, 5.0, 0.95);
        let display = format!("{ci}");
        assert!(display.contains("95.0%"));
        assert!(display.contains("2.5"));
        assert!(display.contains("7.5"));
    }

    #[test]
    fn test_interval_report_ordering() {
        let mut report = IntervalReport::new();
        report.insert("mean", ConfidenceInterval::new(4.0, 6.0, 5.0, 0.95));
        report.insert("sd", ConfidenceInterval::new(1.5, 2.5, 2.0, 0.95));

        assert_eq!(report.len(), 2);
        assert_eq!(report.get("mean").unwrap().estimate, 5.0);
        assert_eq!(report.get("sd").unwrap().estimate, 2.0);
        assert!(report.get("rate").is_none());

        let names: Vec<&str> = report.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["mean", "sd"]);
    }

    #[test]
    fn test_warning_display() {
        let w = BootstrapWarning::InsufficientReplicates {
            parameter: "sd".to_string(),
            surviving: 4,
        };
        assert!(format!("{w}").contains("4 replicates"));

        let w = BootstrapWarning::LowConvergence { rate: 0.5 };
        assert!(format!("{w}").contains("50.0%"));
    }
}
