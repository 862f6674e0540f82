use super::{
    check_point, check_probability, discrete_point, neg_p_log_p, scan_quantile, Distribution,
    Kind, Mgf, Moments,
};
use crate::error::{Result, StatsError};
use crate::random::Sampler;
use crate::range::Range;
use crate::special::{binomial_coefficient, ln_gamma, EntropyUnit};
use ndarray::{array, Array1};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Up to this many trials every `C(n, k)` is finite.
const EXACT_COEFFICIENT_TRIALS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinomialParams {
    pub trials: u64,
    pub p: f64,
}

/// Number of successes in `trials` independent Bernoulli(p) trials.
#[derive(Debug, Clone)]
pub struct Binomial {
    params: BinomialParams,
    moments: Moments,
    fisher: Array1<f64>,
    sampler: Sampler,
}

impl Binomial {
    pub fn new(seed: u64, trials: u64, p: f64) -> Result<Self> {
        check_probability(p).map_err(|_| {
            StatsError::domain(format!("Binomial requires 0 <= p <= 1, got {p}"))
        })?;
        let n = trials as f64;
        let q = 1. - p;
        let npq = n * p * q;
        Ok(Self {
            params: BinomialParams { trials, p },
            moments: Moments {
                mean: n * p,
                variance: npq,
                skewness: (q - p) / npq.sqrt(),
                kurtosis: (1. - 6. * p * q) / npq,
            },
            fisher: array![n / (p * q)],
            sampler: Sampler::new(seed),
        })
    }

    pub fn params(&self) -> BinomialParams {
        self.params
    }

    /// Mass of the degenerate laws `p = 0` and `p = 1`; `None` otherwise.
    fn point_mass(&self, k: u64) -> Option<f64> {
        let BinomialParams { trials, p } = self.params;
        let at = if p == 0. {
            0
        } else if p == 1. {
            trials
        } else {
            return None;
        };
        Some(if k == at { 1. } else { 0. })
    }

    /// P(X = k) for `k <= trials`.
    fn mass(&self, k: u64) -> f64 {
        if let Some(m) = self.point_mass(k) {
            return m;
        }
        let BinomialParams { trials, p } = self.params;
        debug_assert!(k <= trials);
        let (k_f, rest) = (k as f64, (trials - k) as f64);
        if trials <= EXACT_COEFFICIENT_TRIALS {
            if let Ok(c) = binomial_coefficient(trials as i64, k as i64) {
                return c * p.powf(k_f) * (1. - p).powf(rest);
            }
        }
        (ln_gamma(trials as f64 + 1.) - ln_gamma(k_f + 1.) - ln_gamma(rest + 1.)
            + k_f * p.ln()
            + rest * (1. - p).ln())
        .exp()
    }

    /// Masses of `0, 1, ..., trials` in order, each from the previous one by
    /// `m(k+1) = m(k)·(n-k)/(k+1)·p/q`. The recurrence is carried in log
    /// space from `ln m(0) = n·ln q`, so masses that underflow at the start
    /// do not zero out the rest.
    fn masses(&self) -> impl Iterator<Item = f64> + '_ {
        let BinomialParams { trials, p } = self.params;
        let n = trials as f64;
        let ln_odds = p.ln() - (1. - p).ln();
        let mut ln_mass = n * (1. - p).ln();
        (0..=trials).map(move |k| {
            if let Some(m) = self.point_mass(k) {
                return m;
            }
            let m = ln_mass.exp();
            let k_f = k as f64;
            ln_mass += ((n - k_f) / (k_f + 1.)).ln() + ln_odds;
            m
        })
    }

    fn inverse_cdf(&self, u: f64) -> u64 {
        scan_quantile(u, self.masses())
    }

    fn support(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.masses().enumerate().map(|(k, m)| (k as u64, m))
    }
}

impl rand::distributions::Distribution<f64> for Binomial {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inverse_cdf(rng.gen()) as f64
    }
}

impl Distribution for Binomial {
    fn name(&self) -> &'static str {
        "Binomial"
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
        if k < 0 || k as u64 > self.params.trials {
            return Ok(Range::single(0.));
        }
        Ok(Range::single(self.mass(k as u64)))
    }

    fn cdf(&self, x: f64) -> Result<Range> {
        check_point(x)?;
        if x < 0. {
            return Ok(Range::single(0.));
        }
        if x >= self.params.trials as f64 {
            return Ok(Range::single(1.));
        }
        let last = x.floor() as usize;
        let c: f64 = self.masses().take(last + 1).sum();
        Ok(Range::single(c.min(1.)))
    }

    fn quantile(&self, p: f64) -> Result<Range> {
        check_probability(p)?;
        Ok(Range::single(self.inverse_cdf(p) as f64))
    }

    fn moments(&self) -> &Moments {
        &self.moments
    }

    fn entropy(&self, unit: EntropyUnit) -> f64 {
        self.support().map(|(_, m)| neg_p_log_p(m, unit)).sum()
    }

    fn median(&self) -> Range {
        Range::single(self.inverse_cdf(0.5) as f64)
    }

    fn mode(&self) -> Range {
        let BinomialParams { trials, p } = self.params;
        if p == 0. {
            return Range::single(0.);
        }
        if p == 1. {
            return Range::single(trials as f64);
        }
        let m = (trials as f64 + 1.) * p;
        if m.fract() == 0. && m >= 1. && m <= trials as f64 {
            // two equally likely modes
            if let Ok(r) = Range::discrete([m - 1., m]) {
                return r;
            }
        }
        Range::single(m.floor())
    }

    fn mad(&self) -> Result<f64> {
        let mean = self.moments.mean;
        Ok(self.support().map(|(k, m)| (k as f64 - mean).abs() * m).sum())
    }

    fn mgf(&self) -> Result<Mgf> {
        Ok(Mgf::Binomial {
            trials: self.params.trials,
            p: self.params.p,
        })
    }

    fn fisher_information(&self) -> Result<Array1<f64>> {
        Ok(self.fisher.clone())
    }
}
