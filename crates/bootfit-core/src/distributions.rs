//! Distribution registry interface
//!
//! The parametric resampling strategy needs two capabilities from a
//! distribution family: drawing random variates under a given parameter set
//! and evaluating quantiles. [`DistributionRegistry`] is that narrow
//! interface; [`StatrsRegistry`] is the statrs-backed implementation used by
//! default.

use crate::{Error, Family, Parameters, Result};
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::{ContinuousCDF, Exp, Gamma, LogNormal, Normal};

/// Capability interface onto a distribution family
///
/// Failures here are generation failures (bad parameter combinations for
/// the family), distinct from fit failures downstream.
pub trait DistributionRegistry: Clone + Send + Sync {
    /// Draw `n` independent variates from `family` under `params`
    fn sample_n<R: Rng + ?Sized>(
        &self,
        family: Family,
        params: &Parameters,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>>;

    /// Evaluate the quantile function of `family` at `p` under `params`
    fn quantile(&self, family: Family, p: f64, params: &Parameters) -> Result<f64>;
}

/// Registry backed by statrs distribution implementations
#[derive(Debug, Clone, Copy, Default)]
pub struct StatrsRegistry;

fn require(params: &Parameters, name: &str) -> Result<f64> {
    params
        .get(name)
        .ok_or_else(|| Error::InvalidParameter(format!("missing parameter {name}")))
}

fn generation_error(family: Family, err: impl std::fmt::Display) -> Error {
    Error::Generation(format!("{family} parameters rejected: {err}"))
}

fn draw<D, R>(dist: D, n: usize, rng: &mut R) -> Vec<f64>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    (0..n).map(|_| dist.sample(rng)).collect()
}

impl StatrsRegistry {
    fn normal(&self, params: &Parameters) -> Result<Normal> {
        Normal::new(require(params, "mean")?, require(params, "sd")?)
            .map_err(|e| generation_error(Family::Normal, e))
    }

    fn lognormal(&self, params: &Parameters) -> Result<LogNormal> {
        LogNormal::new(require(params, "meanlog")?, require(params, "sdlog")?)
            .map_err(|e| generation_error(Family::LogNormal, e))
    }

    fn exponential(&self, params: &Parameters) -> Result<Exp> {
        Exp::new(require(params, "rate")?).map_err(|e| generation_error(Family::Exponential, e))
    }

    fn gamma(&self, params: &Parameters) -> Result<Gamma> {
        Gamma::new(require(params, "shape")?, require(params, "rate")?)
            .map_err(|e| generation_error(Family::Gamma, e))
    }
}

impl DistributionRegistry for StatrsRegistry {
    fn sample_n<R: Rng + ?Sized>(
        &self,
        family: Family,
        params: &Parameters,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        match family {
            Family::Normal => Ok(draw(self.normal(params)?, n, rng)),
            Family::LogNormal => Ok(draw(self.lognormal(params)?, n, rng)),
            Family::Exponential => Ok(draw(self.exponential(params)?, n, rng)),
            Family::Gamma => Ok(draw(self.gamma(params)?, n, rng)),
        }
    }

    fn quantile(&self, family: Family, p: f64, params: &Parameters) -> Result<f64> {
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::invalid_probability(p));
        }
        let q = match family {
            Family::Normal => self.normal(params)?.inverse_cdf(p),
            Family::LogNormal => self.lognormal(params)?.inverse_cdf(p),
            Family::Exponential => self.exponential(params)?.inverse_cdf(p),
            Family::Gamma => self.gamma(params)?.inverse_cdf(p),
        };
        Ok(q)
    }
}
