use super::{
    check_point, check_probability, discrete_point, neg_p_log_p, positive_finite, scan_quantile,
    Distribution, Kind, Mgf, Moments,
};
use crate::error::Result;
use crate::random::Sampler;
use crate::range::Range;
use crate::special::{factorial, ln_gamma, EntropyUnit};
use ndarray::{array, Array1};
use num::traits::FloatConst;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Rates from here on use the asymptotic entropy expansion.
const ASYMPTOTIC_ENTROPY_RATE: f64 = 10.;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoissonParams {
    pub rate: f64,
}

/// Count of events in a unit interval at a constant `rate`.
#[derive(Debug, Clone)]
pub struct Poisson {
    params: PoissonParams,
    moments: Moments,
    fisher: Array1<f64>,
    sampler: Sampler,
}

impl Poisson {
    pub fn new(seed: u64, rate: f64) -> Result<Self> {
        let rate = positive_finite("Poisson rate", rate)?;
        Ok(Self {
            params: PoissonParams { rate },
            moments: Moments {
                mean: rate,
                variance: rate,
                skewness: rate.sqrt().recip(),
                kurtosis: rate.recip(),
            },
            fisher: array![rate.recip()],
            sampler: Sampler::new(seed),
        })
    }

    pub fn params(&self) -> PoissonParams {
        self.params
    }

    fn mass(&self, k: u64) -> f64 {
        let rate = self.params.rate;
        let k_f = k as f64;
        if rate <= 100. {
            if let Ok(f) = factorial(k as i64) {
                let direct = rate.powf(k_f) * (-rate).exp() / f;
                if f.is_finite() && direct.is_finite() {
                    return direct;
                }
            }
        }
        (k_f * rate.ln() - rate - ln_gamma(k_f + 1.)).exp()
    }

    /// Past this count the remaining tail mass is below double precision.
    fn tail_cutoff(&self) -> u64 {
        let rate = self.params.rate;
        (rate + 40. * rate.sqrt() + 50.).ceil() as u64
    }

    fn inverse_cdf(&self, u: f64) -> u64 {
        scan_quantile(u, (0..=self.tail_cutoff()).map(|k| self.mass(k)))
    }
}

impl rand::distributions::Distribution<f64> for Poisson {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inverse_cdf(rng.gen()) as f64
    }
}

impl Distribution for Poisson {
    fn name(&self) -> &'static str {
        "Poisson"
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
        let k = discrete_point(x)?;
        if k < 0 {
            return Ok(Range::single(0.));
        }
        Ok(Range::single(self.mass(k as u64)))
    }

    fn cdf(&self, x: f64) -> Result<Range> {
        check_point(x)?;
        if x < 0. {
            return Ok(Range::single(0.));
        }
        let last = x.floor().min(self.tail_cutoff() as f64) as u64;
        let c: f64 = (0..=last).map(|k| self.mass(k)).sum();
        Ok(Range::single(c.min(1.)))
    }

    fn quantile(&self, p: f64) -> Result<Range> {
        check_probability(p)?;
        if p == 1. {
            return Ok(Range::single(f64::INFINITY));
        }
        Ok(Range::single(self.inverse_cdf(p) as f64))
    }

    fn moments(&self) -> &Moments {
        &self.moments
    }

    fn entropy(&self, unit: EntropyUnit) -> f64 {
        let rate = self.params.rate;
        if rate < ASYMPTOTIC_ENTROPY_RATE {
            return (0..=self.tail_cutoff())
                .map(|k| neg_p_log_p(self.mass(k), unit))
                .sum();
        }
        let nats = 0.5 * (f64::TAU() * f64::E() * rate).ln()
            - 1. / (12. * rate)
            - 1. / (24. * rate.powi(2))
            - 19. / (360. * rate.powi(3));
        unit.from_nats(nats)
    }

    fn median(&self) -> Range {
        Range::single(self.inverse_cdf(0.5) as f64)
    }

    fn mode(&self) -> Range {
        let rate = self.params.rate;
        if rate.fract() == 0. {
            // λ-1 and λ are equally likely
            if let Ok(r) = Range::discrete([rate - 1., rate]) {
                return r;
            }
        }
        Range::single(rate.floor())
    }

    fn mad(&self) -> Result<f64> {
        // 2λ^(⌊λ⌋+1)·e^-λ / ⌊λ⌋!
        let rate = self.params.rate;
        Ok(2. * rate * self.mass(rate.floor() as u64))
    }

    fn mgf(&self) -> Result<Mgf> {
        Ok(Mgf::Poisson {
            rate: self.params.rate,
        })
    }

    fn fisher_information(&self) -> Result<Array1<f64>> {
        Ok(self.fisher.clone())
    }
}
