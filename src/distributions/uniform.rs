use super::{check_point, check_probability, same_family, Distribution, Kind, Mgf, Moments};
use crate::constants::EPSILON;
use crate::error::{Result, StatsError};
use crate::integrate::simpson_default;
use crate::random::Sampler;
use crate::range::Range;
use crate::special::{entropy_log, EntropyUnit};
use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::any::Any;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformParams {
    pub min: f64,
    pub max: f64,
}

/// Constant density on `[min, max]`.
#[derive(Debug, Clone)]
pub struct Uniform {
    params: UniformParams,
    moments: Moments,
    mode: Range,
    sampler: Sampler,
}

impl Uniform {
    pub fn new(seed: u64, min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(StatsError::domain(format!(
                "Uniform requires finite min < max, got [{min}, {max}]"
            )));
        }
        let width = max - min;
        Ok(Self {
            params: UniformParams { min, max },
            moments: Moments {
                mean: 0.5 * (min + max),
                variance: width * width / 12.,
                skewness: 0.,
                kurtosis: -6. / 5.,
            },
            // every point of the support is a mode
            mode: Range::continuous(vec![min, max], EPSILON)?,
            sampler: Sampler::new(seed),
        })
    }

    pub fn params(&self) -> UniformParams {
        self.params
    }

    fn width(&self) -> f64 {
        self.params.max - self.params.min
    }

    fn density(&self, x: f64) -> f64 {
        if x < self.params.min || x > self.params.max {
            0.
        } else {
            1. / self.width()
        }
    }
}

impl rand::distributions::Distribution<f64> for Uniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.params.min + rng.gen::<f64>() * self.width()
    }
}

impl Distribution for Uniform {
    fn name(&self) -> &'static str {
        "Uniform"
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
        Ok(Range::single(self.density(x)))
    }

    fn cdf(&self, x: f64) -> Result<Range> {
        check_point(x)?;
        let c = ((x - self.params.min) / self.width()).clamp(0., 1.);
        Ok(Range::single(c))
    }

    fn quantile(&self, p: f64) -> Result<Range> {
        check_probability(p)?;
        Ok(Range::single(self.params.min + p * self.width()))
    }

    fn moments(&self) -> &Moments {
        &self.moments
    }

    fn entropy(&self, unit: EntropyUnit) -> f64 {
        entropy_log(self.width(), unit)
    }

    fn median(&self) -> Range {
        Range::single(self.moments.mean)
    }

    fn mode(&self) -> Range {
        self.mode.clone()
    }

    fn mad(&self) -> Result<f64> {
        Ok(self.width() / 4.)
    }

    fn mgf(&self) -> Result<Mgf> {
        Ok(Mgf::Uniform {
            min: self.params.min,
            max: self.params.max,
        })
    }

    fn fisher_information(&self) -> Result<Array1<f64>> {
        Err(StatsError::undefined("Fisher information", self.name()))
    }

    fn kl_divergence(&self, other: &dyn Distribution) -> Result<f64> {
        let q = same_family::<Uniform>(self.name(), other)?;
        let UniformParams { min, max } = self.params;
        if min < q.params.min || max > q.params.max {
            return Ok(f64::INFINITY);
        }
        simpson_default(
            |x| {
                let (px, qx) = (self.density(x), q.density(x));
                if px == 0. {
                    0.
                } else {
                    px * (px / qx).ln()
                }
            },
            min,
            max,
        )
    }
}
