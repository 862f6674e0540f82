use super::{
    check_point, check_probability, positive_finite, same_family, Distribution, Kind, Mgf,
    Moments,
};
use crate::constants::CONSTANTS;
use crate::error::{Result, StatsError};
use crate::random::{open_uniform, Sampler};
use crate::range::Range;
use crate::special::{gamma, EntropyUnit};
use ndarray::Array1;
use num::traits::FloatConst;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::any::Any;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeibullParams {
    pub scale: f64,
    pub shape: f64,
}

/// Weibull distribution with scale `λ` and shape `k`.
#[derive(Debug, Clone)]
pub struct Weibull {
    params: WeibullParams,
    moments: Moments,
    sampler: Sampler,
}

impl Weibull {
    pub fn new(seed: u64, scale: f64, shape: f64) -> Result<Self> {
        let scale = positive_finite("Weibull scale", scale)?;
        let shape = positive_finite("Weibull shape", shape)?;
        // Γ(1 + i/k) for i = 1..=4
        let g = |i: f64| gamma(1. + i / shape);
        let (g1, g2, g3, g4) = (g(1.), g(2.), g(3.), g(4.));
        let spread = g2 - g1 * g1;
        Ok(Self {
            params: WeibullParams { scale, shape },
            moments: Moments {
                mean: scale * g1,
                variance: scale * scale * spread,
                skewness: (g3 - 3. * g1 * g2 + 2. * g1.powi(3)) / spread.powf(1.5),
                kurtosis: (g4 - 4. * g1 * g3 + 12. * g1 * g1 * g2 - 3. * g2 * g2
                    - 6. * g1.powi(4))
                    / (spread * spread),
            },
            sampler: Sampler::new(seed),
        })
    }

    pub fn params(&self) -> WeibullParams {
        self.params
    }
}

impl rand::distributions::Distribution<f64> for Weibull {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let WeibullParams { scale, shape } = self.params;
        scale * (-open_uniform(rng).ln()).powf(shape.recip())
    }
}

impl Distribution for Weibull {
    fn name(&self) -> &'static str {
        "Weibull"
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
        let WeibullParams { scale, shape } = self.params;
        let density = if x < 0. {
            0.
        } else if x == 0. {
            match shape.partial_cmp(&1.) {
                Some(std::cmp::Ordering::Less) => f64::INFINITY,
                Some(std::cmp::Ordering::Equal) => 1. / scale,
                _ => 0.,
            }
        } else {
            let z = x / scale;
            shape / scale * z.powf(shape - 1.) * (-z.powf(shape)).exp()
        };
        Ok(Range::single(density))
    }

    fn cdf(&self, x: f64) -> Result<Range> {
        check_point(x)?;
        let WeibullParams { scale, shape } = self.params;
        let c = if x <= 0. {
            0.
        } else {
            -(-(x / scale).powf(shape)).exp_m1()
        };
        Ok(Range::single(c))
    }

    fn quantile(&self, p: f64) -> Result<Range> {
        check_probability(p)?;
        let WeibullParams { scale, shape } = self.params;
        Ok(Range::single(scale * (-(-p).ln_1p()).powf(shape.recip())))
    }

    fn moments(&self) -> &Moments {
        &self.moments
    }

    fn entropy(&self, unit: EntropyUnit) -> f64 {
        let WeibullParams { scale, shape } = self.params;
        let nats = CONSTANTS.euler_mascheroni * (1. - shape.recip()) + (scale / shape).ln() + 1.;
        unit.from_nats(nats)
    }

    fn median(&self) -> Range {
        let WeibullParams { scale, shape } = self.params;
        Range::single(scale * f64::LN_2().powf(shape.recip()))
    }

    fn mode(&self) -> Range {
        let WeibullParams { scale, shape } = self.params;
        if shape > 1. {
            Range::single(scale * ((shape - 1.) / shape).powf(shape.recip()))
        } else {
            Range::single(0.)
        }
    }

    fn mad(&self) -> Result<f64> {
        Err(StatsError::undefined("mean absolute deviation", self.name()))
    }

    fn mgf(&self) -> Result<Mgf> {
        Err(StatsError::undefined("moment generating function", self.name()))
    }

    fn fisher_information(&self) -> Result<Array1<f64>> {
        Err(StatsError::undefined("Fisher information", self.name()))
    }

    fn kl_divergence(&self, other: &dyn Distribution) -> Result<f64> {
        let q = same_family::<Weibull>(self.name(), other)?;
        let WeibullParams {
            scale: l1,
            shape: k1,
        } = self.params;
        let WeibullParams {
            scale: l2,
            shape: k2,
        } = q.params;
        let gamma_e = CONSTANTS.euler_mascheroni;
        Ok((k1.ln() - k1 * l1.ln()) - (k2.ln() - k2 * l2.ln())
            + (k1 - k2) * (l1.ln() - gamma_e / k1)
            + (l1 / l2).powf(k2) * gamma(k2 / k1 + 1.)
            - 1.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{Continuous, ContinuousCDF, Weibull as Reference};

    #[test]
    fn construction() {
        assert!(Weibull::new(0, 0., 1.).unwrap_err().is_domain());
        assert!(Weibull::new(0, 1., f64::INFINITY).is_err());
    }

    #[test]
    fn matches_reference() {
        for &(scale, shape) in &[(1., 0.7), (2., 1.5), (0.5, 4.)] {
            let d = Weibull::new(0, scale, shape).unwrap();
            let r = Reference::new(shape, scale).unwrap();
            for &x in &[0.05, 0.4, 1., 2.5] {
                let pdf = d.pdf(x).unwrap().value().unwrap();
                let cdf = d.cdf(x).unwrap().value().unwrap();
                assert!((pdf - r.pdf(x)).abs() < 1e-12, "pdf({x})");
                assert!((cdf - r.cdf(x)).abs() < 1e-12, "cdf({x})");
            }
        }
    }

    #[test]
    fn shape_one_is_exponential() {
        let d = Weibull::new(0, 2., 1.).unwrap();
        assert!((d.mean() - 2.).abs() < 1e-9);
        assert!((d.variance() - 4.).abs() < 1e-8);
        assert!((d.skewness() - 2.).abs() < 1e-6);
        assert!((d.kurtosis() - 6.).abs() < 1e-5);
        assert!((d.entropy(EntropyUnit::Nats) - (1. + 2_f64.ln())).abs() < 1e-12);
        assert_eq!(d.mode(), Range::single(0.));
        assert_eq!(d.median(), Range::single(2. * std::f64::consts::LN_2));
    }

    #[test]
    fn quantile_inverts_cdf() {
        let d = Weibull::new(0, 1.3, 2.2).unwrap();
        for i in 1..10 {
            let p = i as f64 / 10.;
            let x = d.quantile(p).unwrap().value().unwrap();
            assert!((d.cdf(x).unwrap().value().unwrap() - p).abs() < 1e-12);
        }
        assert_eq!(d.quantile(1.).unwrap().value(), Some(f64::INFINITY));
    }

    #[test]
    fn undefined_statistics() {
        let d = Weibull::new(0, 1., 2.).unwrap();
        assert!(d.mad().unwrap_err().is_undefined());
        assert!(d.mgf().unwrap_err().is_undefined());
        assert!(d.moment(1).unwrap_err().is_undefined());
        assert!(d.fisher_information().unwrap_err().is_undefined());
    }

    #[test]
    fn kl_divergence() {
        let p = Weibull::new(0, 1.5, 2.).unwrap();
        assert!(p.kl_divergence(&p).unwrap().abs() < 1e-9);
        // shape 1 on both sides is the exponential formula with rates 1/λ
        let a = Weibull::new(0, 1., 1.).unwrap();
        let b = Weibull::new(0, 3., 1.).unwrap();
        let expected = 3_f64.ln() + 1. / 3. - 1.;
        assert!((a.kl_divergence(&b).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn sample_mean() {
        let d = Weibull::new(12, 2., 3.).unwrap();
        let draws = d.sample_many(40_000);
        assert!((draws.mean().unwrap() - d.mean()).abs() < 0.02);
    }
}
