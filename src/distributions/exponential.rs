use super::{
    check_point, check_probability, positive_finite, same_family, Distribution, Kind, Mgf,
    Moments,
};
use crate::error::{Result, StatsError};
use crate::random::{open_uniform, Sampler};
use crate::range::Range;
use crate::special::{entropy_log, EntropyUnit};
use ndarray::{array, Array1};
use num::traits::FloatConst;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::any::Any;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialParams {
    pub rate: f64,
}

/// Waiting time between events of a Poisson process with intensity `rate`.
#[derive(Debug, Clone)]
pub struct Exponential {
    params: ExponentialParams,
    moments: Moments,
    fisher: Array1<f64>,
    sampler: Sampler,
}

impl Exponential {
    pub fn new(seed: u64, rate: f64) -> Result<Self> {
        let rate = positive_finite("Exponential rate", rate)?;
        Ok(Self {
            params: ExponentialParams { rate },
            moments: Moments {
                mean: rate.recip(),
                variance: rate.powi(-2),
                skewness: 2.,
                kurtosis: 6.,
            },
            fisher: array![rate.powi(-2)],
            sampler: Sampler::new(seed),
        })
    }

    pub fn params(&self) -> ExponentialParams {
        self.params
    }
}

impl rand::distributions::Distribution<f64> for Exponential {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        -open_uniform(rng).ln() / self.params.rate
    }
}

impl Distribution for Exponential {
    fn name(&self) -> &'static str {
        "Exponential"
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
        let rate = self.params.rate;
        let density = if x < 0. { 0. } else { rate * (-rate * x).exp() };
        Ok(Range::single(density))
    }

    fn cdf(&self, x: f64) -> Result<Range> {
        check_point(x)?;
        let c = if x <= 0. {
            0.
        } else {
            -(-self.params.rate * x).exp_m1()
        };
        Ok(Range::single(c))
    }

    fn quantile(&self, p: f64) -> Result<Range> {
        check_probability(p)?;
        Ok(Range::single(-(-p).ln_1p() / self.params.rate))
    }

    fn moments(&self) -> &Moments {
        &self.moments
    }

    fn entropy(&self, unit: EntropyUnit) -> f64 {
        entropy_log(f64::E() / self.params.rate, unit)
    }

    fn median(&self) -> Range {
        Range::single(f64::LN_2() / self.params.rate)
    }

    fn mode(&self) -> Range {
        Range::single(0.)
    }

    fn mad(&self) -> Result<f64> {
        Err(StatsError::undefined("mean absolute deviation", self.name()))
    }

    fn mgf(&self) -> Result<Mgf> {
        Ok(Mgf::Exponential {
            rate: self.params.rate,
        })
    }

    fn fisher_information(&self) -> Result<Array1<f64>> {
        Ok(self.fisher.clone())
    }

    fn kl_divergence(&self, other: &dyn Distribution) -> Result<f64> {
        let q = same_family::<Exponential>(self.name(), other)?;
        let (l1, l2) = (self.params.rate, q.params.rate);
        Ok((l1 / l2).ln() + l2 / l1 - 1.)
    }
}
