use super::{
    check_point, check_probability, positive_finite, same_family, Distribution, Kind, Mgf,
    Moments,
};
use crate::error::{Result, StatsError};
use crate::random::{standard_normal, Sampler};
use crate::range::Range;
use crate::special::{entropy_log, erfc, EntropyUnit, ErfMethod};
use ndarray::{array, Array1};
use num::traits::FloatConst;
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc_inv;
use std::any::Any;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub std_dev: f64,
}

/// Gaussian with location `mean` and scale `std_dev`.
#[derive(Debug, Clone)]
pub struct Normal {
    params: NormalParams,
    moments: Moments,
    fisher: Array1<f64>,
    sampler: Sampler,
}

impl Normal {
    pub fn new(seed: u64, mean: f64, std_dev: f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(StatsError::domain(format!(
                "Normal mean must be finite, got {mean}"
            )));
        }
        let std_dev = positive_finite("Normal standard deviation", std_dev)?;
        let var = std_dev * std_dev;
        Ok(Self {
            params: NormalParams { mean, std_dev },
            moments: Moments {
                mean,
                variance: var,
                skewness: 0.,
                kurtosis: 0.,
            },
            // (μ, σ) parametrisation
            fisher: array![1. / var, 0., 0., 2. / var],
            sampler: Sampler::new(seed),
        })
    }

    pub fn params(&self) -> NormalParams {
        self.params
    }

    fn standardize(&self, x: f64) -> f64 {
        (x - self.params.mean) / self.params.std_dev
    }
}

impl rand::distributions::Distribution<f64> for Normal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.params.mean + self.params.std_dev * standard_normal(rng)
    }
}

impl Distribution for Normal {
    fn name(&self) -> &'static str {
        "Normal"
    }

    fn kind(&self) -> Kind {
        Kind::Continuous
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    fn sample(&self) -> f64 {
        self.sampler.draw(self)
    }

    fn pdf(&self, x: f64) -> Result<Range> {
        check_point(x)?;
        let z = self.standardize(x);
        let density = (-0.5 * z * z).exp() / (self.params.std_dev * f64::TAU().sqrt());
        Ok(Range::single(density))
    }

    fn cdf(&self, x: f64) -> Result<Range> {
        check_point(x)?;
        let z = self.standardize(x);
        let c = 0.5 * erfc(-z / f64::SQRT_2(), ErfMethod::Exact);
        Ok(Range::single(c.clamp(0., 1.)))
    }

    fn quantile(&self, p: f64) -> Result<Range> {
        check_probability(p)?;
        let x = if p == 0. {
            f64::NEG_INFINITY
        } else if p == 1. {
            f64::INFINITY
        } else {
            self.params.mean - self.params.std_dev * f64::SQRT_2() * erfc_inv(2. * p)
        };
        Ok(Range::single(x))
    }

    fn moments(&self) -> &Moments {
        &self.moments
    }

    fn entropy(&self, unit: EntropyUnit) -> f64 {
        0.5 * entropy_log(f64::TAU() * f64::E() * self.moments.variance, unit)
    }

    fn median(&self) -> Range {
        Range::single(self.params.mean)
    }

    fn mode(&self) -> Range {
        Range::single(self.params.mean)
    }

    fn mad(&self) -> Result<f64> {
        Ok(self.params.std_dev * (2. / f64::PI()).sqrt())
    }

    fn mgf(&self) -> Result<Mgf> {
        Ok(Mgf::Normal {
            mean: self.params.mean,
            std_dev: self.params.std_dev,
        })
    }

    fn fisher_information(&self) -> Result<Array1<f64>> {
        Ok(self.fisher.clone())
    }

    fn kl_divergence(&self, other: &dyn Distribution) -> Result<f64> {
        let q = same_family::<Normal>(self.name(), other)?;
        let (s1, s2) = (self.params.std_dev, q.params.std_dev);
        let dm = self.params.mean - q.params.mean;
        Ok((s2 / s1).ln() + (s1 * s1 + dm * dm) / (2. * s2 * s2) - 0.5)
    }
}
