//! Univariate distributions behind one capability trait.
//!
//! Every family validates its parameters once in `new`, precomputes its
//! moments and Fisher information, and owns a seeded [`Sampler`]. Families
//! also implement [`rand::distributions::Distribution<f64>`] so they can be
//! driven by an external generator.
//!
//! | Family | Kind | Parameters |
//! |---|---|---|
//! | [`Bernoulli`] | discrete | p |
//! | [`Binomial`] | discrete | trials, p |
//! | [`Poisson`] | discrete | rate |
//! | [`Normal`] | continuous | mean, std_dev |
//! | [`Uniform`] | continuous | min, max |
//! | [`Exponential`] | continuous | rate |
//! | [`Gamma`] | continuous | shape, scale |
//! | [`Weibull`] | continuous | scale, shape |
use crate::error::{Result, StatsError};
use crate::range::Range;
use crate::special::{entropy_log, EntropyUnit};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;

mod bernoulli;
mod binomial;
mod exponential;
mod gamma;
mod mgf;
mod normal;
mod poisson;
mod uniform;
mod weibull;

pub use bernoulli::{Bernoulli, BernoulliParams};
pub use binomial::{Binomial, BinomialParams};
pub use exponential::{Exponential, ExponentialParams};
pub use gamma::{Gamma, GammaParams};
pub use mgf::Mgf;
pub use normal::{Normal, NormalParams};
pub use poisson::{Poisson, PoissonParams};
pub use uniform::{Uniform, UniformParams};
pub use weibull::{Weibull, WeibullParams};

/// Whether a distribution puts mass on points or density on a continuum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Discrete,
    Continuous,
}

/// Moments fixed at construction. `kurtosis` is the excess kurtosis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

/// The contract every distribution implements.
///
/// Queries that make no sense for a family return
/// [`StatsError::Undefined`]; arguments outside the support or outside
/// `[0, 1]` for `quantile` return [`StatsError::Domain`].
pub trait Distribution: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    fn kind(&self) -> Kind;

    fn as_any(&self) -> &dyn Any;

    /// Seed the owned generator was created with.
    fn seed(&self) -> u64;

    /// One random variate from the owned generator.
    fn sample(&self) -> f64;

    /// `n` independent variates.
    fn sample_many(&self, n: usize) -> Array1<f64> {
        Array1::from_shape_simple_fn(n, || self.sample())
    }

    fn pdf(&self, x: f64) -> Result<Range>;

    fn cdf(&self, x: f64) -> Result<Range>;

    fn quantile(&self, p: f64) -> Result<Range>;

    fn moments(&self) -> &Moments;

    fn mean(&self) -> f64 {
        self.moments().mean
    }

    fn variance(&self) -> f64 {
        self.moments().variance
    }

    fn stddev(&self) -> f64 {
        self.moments().variance.sqrt()
    }

    fn skewness(&self) -> f64 {
        self.moments().skewness
    }

    fn kurtosis(&self) -> f64 {
        self.moments().kurtosis
    }

    fn entropy(&self, unit: EntropyUnit) -> f64;

    fn median(&self) -> Range;

    fn mode(&self) -> Range;

    /// Mean absolute deviation around the mean.
    fn mad(&self) -> Result<f64>;

    fn mgf(&self) -> Result<Mgf>;

    /// n-th raw moment, the n-th derivative of the MGF at zero.
    fn moment(&self, n: u32) -> Result<f64> {
        self.mgf()?.derivative_at_zero(n)
    }

    /// Fisher information, flattened row-major.
    fn fisher_information(&self) -> Result<Array1<f64>>;

    /// `KL(self || other)` in nats.
    fn kl_divergence(&self, _other: &dyn Distribution) -> Result<f64> {
        Err(StatsError::undefined("KL divergence", self.name()))
    }
}

pub(crate) fn check_probability(p: f64) -> Result<()> {
    if p.is_nan() || !(0. ..=1.).contains(&p) {
        return Err(StatsError::domain(format!(
            "probability must be in [0, 1], got {p}"
        )));
    }
    Ok(())
}

pub(crate) fn check_point(x: f64) -> Result<()> {
    if x.is_nan() {
        return Err(StatsError::domain("evaluation point is NaN"));
    }
    Ok(())
}

/// Integral value of a discrete query point.
pub(crate) fn discrete_point(x: f64) -> Result<i64> {
    if !x.is_finite() || x.fract() != 0. {
        return Err(StatsError::domain(format!(
            "discrete distributions are evaluated at integers, got {x}"
        )));
    }
    Ok(x as i64)
}

pub(crate) fn positive_finite(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0. {
        return Err(StatsError::domain(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(value)
}

/// `other` viewed as the same concrete family as the caller.
pub(crate) fn same_family<'a, T: 'static>(
    name: &'static str,
    other: &'a dyn Distribution,
) -> Result<&'a T> {
    other.as_any().downcast_ref::<T>().ok_or_else(|| {
        StatsError::domain(format!(
            "KL divergence needs two {name} distributions, got {}",
            other.name()
        ))
    })
}

/// Smallest `k` whose cumulative mass reaches `p`, scanning the masses of
/// `0, 1, 2, ...` in order. Falls back to the last index seen.
pub(crate) fn scan_quantile(p: f64, masses: impl IntoIterator<Item = f64>) -> u64 {
    let mut cdf = 0.;
    let mut last = 0;
    for (k, m) in masses.into_iter().enumerate() {
        cdf += m;
        last = k as u64;
        if cdf >= p {
            break;
        }
    }
    last
}

/// `-p·log p` with the `0·log 0 = 0` convention.
pub(crate) fn neg_p_log_p(p: f64, unit: EntropyUnit) -> f64 {
    if p <= 0. {
        0.
    } else {
        -p * entropy_log(p, unit)
    }
}
