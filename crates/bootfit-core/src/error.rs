//! Error types for the bootstrap engine
//!
//! Provides a unified error type for all bootfit crates.

use thiserror::Error;

/// Core error type for bootstrap operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Parameter estimation failed or did not converge
    #[error("Estimation error: {0}")]
    Estimation(String),

    /// Synthetic replicate generation failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for a probability outside (0, 1)
    pub fn invalid_probability(p: f64) -> Self {
        Self::InvalidParameter(format!("Probability {p} must be in (0, 1)"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("confidence level must be in (0, 1)".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid parameter: confidence level must be in (0, 1)"
        );

        let err = Error::InsufficientData {
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 2 samples, got 1"
        );

        let err = Error::Estimation("log-likelihood is degenerate".to_string());
        assert_eq!(
            err.to_string(),
            "Estimation error: log-likelihood is degenerate"
        );

        let err = Error::Generation("rate must be positive".to_string());
        assert_eq!(err.to_string(), "Generation error: rate must be positive");
    }

    #[test]
    fn test_error_helpers() {
        match Error::empty_input() {
            Error::InsufficientData { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            _ => panic!("wrong error type"),
        }

        let err = Error::invalid_probability(1.5);
        assert_eq!(err.to_string(), "Invalid parameter: Probability 1.5 must be in (0, 1)");

        let err = Error::non_finite("replicate sample");
        assert_eq!(
            err.to_string(),
            "Computation error: replicate sample contains NaN or infinite values"
        );
    }
}
