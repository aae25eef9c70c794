//! Model and parameter types
//!
//! A [`FittedModel`] is an immutable snapshot of an upstream fit: the
//! original sample, the distribution family, the estimation method, and the
//! named point estimates. The bootstrap engine reads it but never mutates
//! it, which is what makes sharing it across workers safe.

use crate::{Error, Result};
use std::fmt;

/// Ordered name→value mapping of distribution parameters
///
/// Insertion order is preserved and matches the family's parameter schema
/// for any validated model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameters {
    entries: Vec<(String, f64)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from name/value pairs, preserving order
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        }
    }

    /// Append a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.entries.push((name.into(), value));
    }

    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Parameter names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Parameter values in insertion order
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    /// Iterate over (name, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}

/// Supported distribution families
///
/// A closed set: family-specific behavior dispatches on this enum once at
/// orchestration entry, not on strings per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Normal with parameters `mean`, `sd`
    Normal,
    /// Log-normal with parameters `meanlog`, `sdlog`
    LogNormal,
    /// Exponential with parameter `rate`
    Exponential,
    /// Gamma with parameters `shape`, `rate`
    Gamma,
}

impl Family {
    /// The family's parameter schema, in canonical order
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            Family::Normal => &["mean", "sd"],
            Family::LogNormal => &["meanlog", "sdlog"],
            Family::Exponential => &["rate"],
            Family::Gamma => &["shape", "rate"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Family::Normal => "normal",
            Family::LogNormal => "lognormal",
            Family::Exponential => "exponential",
            Family::Gamma => "gamma",
        }
    }

    /// Check that a parameter set matches this family's schema and holds
    /// finite values
    pub fn validate_params(&self, params: &Parameters) -> Result<()> {
        let schema = self.param_names();
        if params.len() != schema.len() || params.names().zip(schema).any(|(a, &b)| a != b) {
            return Err(Error::InvalidInput(format!(
                "parameters [{params}] do not match the {} schema {:?}",
                self.name(),
                schema
            )));
        }
        if params.values().iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("parameter set"));
        }
        Ok(())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Estimation method used for the original fit and every refit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitMethod {
    /// Maximum likelihood
    MaximumLikelihood,
    /// Method of moments
    Moments,
}

impl fmt::Display for FitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitMethod::MaximumLikelihood => f.write_str("mle"),
            FitMethod::Moments => f.write_str("moments"),
        }
    }
}

/// Immutable snapshot of a fitted distribution model
///
/// Produced upstream and passed into the bootstrap engine read-only. The
/// constructor validates the sample and checks the point estimate against
/// the family's parameter schema, so downstream code can rely on both.
#[derive(Debug, Clone)]
pub struct FittedModel {
    sample: Vec<f64>,
    family: Family,
    method: FitMethod,
    estimate: Parameters,
}

impl FittedModel {
    pub fn new(
        sample: Vec<f64>,
        family: Family,
        method: FitMethod,
        estimate: Parameters,
    ) -> Result<Self> {
        if sample.is_empty() {
            return Err(Error::empty_input());
        }
        if sample.iter().any(|x| !x.is_finite()) {
            return Err(Error::non_finite("sample"));
        }
        family.validate_params(&estimate)?;

        Ok(Self {
            sample,
            family,
            method,
            estimate,
        })
    }

    /// The original observations
    pub fn sample(&self) -> &[f64] {
        &self.sample
    }

    pub fn sample_size(&self) -> usize {
        self.sample.len()
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn method(&self) -> FitMethod {
        self.method
    }

    /// The named point estimates from the original fit
    pub fn estimate(&self) -> &Parameters {
        &self.estimate
    }
}
