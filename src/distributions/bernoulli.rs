use super::{
    check_point, check_probability, discrete_point, neg_p_log_p, Distribution, Kind, Mgf, Moments,
};
use crate::error::{Result, StatsError};
use crate::random::Sampler;
use crate::range::Range;
use crate::special::EntropyUnit;
use ndarray::{array, Array1};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::any::Any;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BernoulliParams {
    pub p: f64,
}

/// Single trial succeeding with probability `p`.
#[derive(Debug, Clone)]
pub struct Bernoulli {
    params: BernoulliParams,
    moments: Moments,
    fisher: Array1<f64>,
    median: Range,
    sampler: Sampler,
}

impl Bernoulli {
    pub fn new(seed: u64, p: f64) -> Result<Self> {
        check_probability(p).map_err(|_| {
            StatsError::domain(format!("Bernoulli requires 0 <= p <= 1, got {p}"))
        })?;
        let q = 1. - p;
        let pq = p * q;
        // the mode and median coincide: whichever outcome is likelier, both at a tie
        let median = if p < 0.5 {
            Range::single(0.)
        } else if p > 0.5 {
            Range::single(1.)
        } else {
            Range::bounded(0., 1.)?
        };
        Ok(Self {
            params: BernoulliParams { p },
            moments: Moments {
                mean: p,
                variance: pq,
                skewness: (q - p) / pq.sqrt(),
                kurtosis: (1. - 6. * pq) / pq,
            },
            fisher: array![1. / pq],
            median,
            sampler: Sampler::new(seed),
        })
    }

    pub fn params(&self) -> BernoulliParams {
        self.params
    }

    fn mass(&self, k: i64) -> f64 {
        match k {
            0 => 1. - self.params.p,
            1 => self.params.p,
            _ => 0.,
        }
    }
}

impl rand::distributions::Distribution<f64> for Bernoulli {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if rng.gen::<f64>() < self.params.p {
            1.
        } else {
            0.
        }
    }
}

impl Distribution for Bernoulli {
    fn name(&self) -> &'static str {
        "Bernoulli"
    }

    fn kind(&self) -> Kind {
        Kind::Discrete
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
        Ok(Range::single(self.mass(discrete_point(x)?)))
    }

    fn cdf(&self, x: f64) -> Result<Range> {
        check_point(x)?;
        let c = if x < 0. {
            0.
        } else if x < 1. {
            1. - self.params.p
        } else {
            1.
        };
        Ok(Range::single(c))
    }

    fn quantile(&self, p: f64) -> Result<Range> {
        check_probability(p)?;
        Ok(Range::single(if p <= 1. - self.params.p { 0. } else { 1. }))
    }

    fn moments(&self) -> &Moments {
        &self.moments
    }

    fn entropy(&self, unit: EntropyUnit) -> f64 {
        let p = self.params.p;
        neg_p_log_p(1. - p, unit) + neg_p_log_p(p, unit)
    }

    fn median(&self) -> Range {
        self.median.clone()
    }

    fn mode(&self) -> Range {
        self.median.clone()
    }

    fn mad(&self) -> Result<f64> {
        Ok(2. * self.moments.variance)
    }

    fn mgf(&self) -> Result<Mgf> {
        Ok(Mgf::Bernoulli { p: self.params.p })
    }

    fn fisher_information(&self) -> Result<Array1<f64>> {
        Ok(self.fisher.clone())
    }
}
