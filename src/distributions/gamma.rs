use super::{
    check_point, check_probability, positive_finite, same_family, Distribution, Kind, Mgf,
    Moments,
};
use crate::constants::EPSILON;
use crate::error::{Result, StatsError};
use crate::random::{standard_gamma, Sampler};
use crate::range::Range;
use crate::special::{digamma, lower_regularized_gamma, precise_ln_gamma, trigamma, EntropyUnit};
use ndarray::{array, Array1};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Hard stop for the quantile bisection and for widening its bracket.
const MAX_BISECTIONS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaParams {
    pub shape: f64,
    pub scale: f64,
}

/// Gamma distribution in the shape/scale parametrisation.
#[derive(Debug, Clone)]
pub struct Gamma {
    params: GammaParams,
    moments: Moments,
    fisher: Array1<f64>,
    median: f64,
    sampler: Sampler,
}

impl Gamma {
    pub fn new(seed: u64, shape: f64, scale: f64) -> Result<Self> {
        let shape = positive_finite("Gamma shape", shape)?;
        let scale = positive_finite("Gamma scale", scale)?;
        let params = GammaParams { shape, scale };
        Ok(Self {
            params,
            moments: Moments {
                mean: shape * scale,
                variance: shape * scale * scale,
                skewness: 2. / shape.sqrt(),
                kurtosis: 6. / shape,
            },
            fisher: array![trigamma(shape), 1. / scale, 1. / scale, shape / (scale * scale)],
            median: inverse_cdf(params, 0.5),
            sampler: Sampler::new(seed),
        })
    }

    pub fn params(&self) -> GammaParams {
        self.params
    }
}

fn cdf_at(params: GammaParams, x: f64) -> f64 {
    if x <= 0. {
        0.
    } else {
        lower_regularized_gamma(params.shape, x / params.scale)
    }
}

/// Bisection on the CDF. The bracket starts at `[0, 100·mean]` and is doubled
/// until it holds `p`. Below 1 the width tolerance shrinks with the bracket,
/// so tiny scales keep the same relative accuracy.
fn inverse_cdf(params: GammaParams, p: f64) -> f64 {
    if p <= 0. {
        return 0.;
    }
    if p >= 1. {
        return f64::INFINITY;
    }
    let mut lo = 0.;
    let mut hi = params.shape * params.scale * 100.;
    for _ in 0..MAX_BISECTIONS {
        if cdf_at(params, hi) >= p {
            break;
        }
        lo = hi;
        hi *= 2.;
    }
    for _ in 0..MAX_BISECTIONS {
        if hi - lo < EPSILON * hi.min(1.) {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if cdf_at(params, mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

impl rand::distributions::Distribution<f64> for Gamma {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.params.scale * standard_gamma(self.params.shape, rng)
    }
}

impl Distribution for Gamma {
    fn name(&self) -> &'static str {
        "Gamma"
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
        let GammaParams { shape, scale } = self.params;
        let density = if x < 0. {
            0.
        } else if x == 0. {
            match shape.partial_cmp(&1.) {
                Some(std::cmp::Ordering::Less) => f64::INFINITY,
                Some(std::cmp::Ordering::Equal) => 1. / scale,
                _ => 0.,
            }
        } else {
            ((shape - 1.) * x.ln() - x / scale - precise_ln_gamma(shape) - shape * scale.ln())
                .exp()
        };
        Ok(Range::single(density))
    }

    fn cdf(&self, x: f64) -> Result<Range> {
        check_point(x)?;
        Ok(Range::single(cdf_at(self.params, x)))
    }

    fn quantile(&self, p: f64) -> Result<Range> {
        check_probability(p)?;
        Ok(Range::single(inverse_cdf(self.params, p)))
    }

    fn moments(&self) -> &Moments {
        &self.moments
    }

    fn entropy(&self, unit: EntropyUnit) -> f64 {
        let GammaParams { shape, scale } = self.params;
        let nats = shape + scale.ln() + precise_ln_gamma(shape) + (1. - shape) * digamma(shape);
        unit.from_nats(nats)
    }

    fn median(&self) -> Range {
        Range::single(self.median)
    }

    fn mode(&self) -> Range {
        let GammaParams { shape, scale } = self.params;
        Range::single(if shape >= 1. { (shape - 1.) * scale } else { 0. })
    }

    fn mad(&self) -> Result<f64> {
        Err(StatsError::undefined("mean absolute deviation", self.name()))
    }

    fn mgf(&self) -> Result<Mgf> {
        Ok(Mgf::Gamma {
            shape: self.params.shape,
            scale: self.params.scale,
        })
    }

    fn fisher_information(&self) -> Result<Array1<f64>> {
        Ok(self.fisher.clone())
    }

    fn kl_divergence(&self, other: &dyn Distribution) -> Result<f64> {
        let q = same_family::<Gamma>(self.name(), other)?;
        let GammaParams {
            shape: a1,
            scale: b1,
        } = self.params;
        let GammaParams {
            shape: a2,
            scale: b2,
        } = q.params;
        Ok((a1 - a2) * digamma(a1) - precise_ln_gamma(a1)
            + precise_ln_gamma(a2)
            + a2 * (b2.ln() - b1.ln())
            + a1 * (b1 - b2) / b2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{Continuous, ContinuousCDF, Gamma as Reference};

    #[test]
    fn construction() {
        assert!(Gamma::new(0, 0., 1.).unwrap_err().is_domain());
        assert!(Gamma::new(0, 1., -1.).is_err());
    }

    #[test]
    fn matches_reference() {
        for &(shape, scale) in &[(0.5, 1.), (2., 3.), (7.5, 0.4)] {
            let d = Gamma::new(0, shape, scale).unwrap();
            let r = Reference::new(shape, 1. / scale).unwrap();
            for &x in &[0.1, 0.7, 2., 5., 13.] {
                let pdf = d.pdf(x).unwrap().value().unwrap();
                let cdf = d.cdf(x).unwrap().value().unwrap();
                assert!((pdf - r.pdf(x)).abs() < 1e-9, "pdf({x}) for {shape}, {scale}");
                assert!((cdf - r.cdf(x)).abs() < 1e-9, "cdf({x}) for {shape}, {scale}");
            }
        }
    }

    #[test]
    fn density_at_origin() {
        assert_eq!(Gamma::new(0, 0.5, 1.).unwrap().pdf(0.).unwrap().value(), Some(f64::INFINITY));
        assert_eq!(Gamma::new(0, 1., 4.).unwrap().pdf(0.).unwrap().value(), Some(0.25));
        assert_eq!(Gamma::new(0, 3., 1.).unwrap().pdf(0.).unwrap().value(), Some(0.));
        assert_eq!(Gamma::new(0, 3., 1.).unwrap().cdf(-1.).unwrap().value(), Some(0.));
    }

    #[test]
    fn quantile_bisection() {
        let d = Gamma::new(0, 2., 3.).unwrap();
        for i in 1..20 {
            let p = i as f64 / 20.;
            let x = d.quantile(p).unwrap().value().unwrap();
            let back = d.cdf(x).unwrap().value().unwrap();
            assert!((back - p).abs() < 1e-9, "p={p}: {back}");
        }
        assert_eq!(d.quantile(0.).unwrap().value(), Some(0.));
        assert_eq!(d.quantile(1.).unwrap().value(), Some(f64::INFINITY));
        // shape 1 is Exponential(1/scale)
        let e = Gamma::new(0, 1., 2.).unwrap();
        let median = e.median().value().unwrap();
        assert!((median - 2. * std::f64::consts::LN_2).abs() < 1e-8);
    }

    #[test]
    fn quantile_at_tiny_scale() {
        let d = Gamma::new(0, 1., 1e-12).unwrap();
        let median = d.median().value().unwrap();
        let expected = 1e-12 * std::f64::consts::LN_2;
        assert!(((median - expected) / expected).abs() < 1e-8, "{median}");
        let x = d.quantile(0.9).unwrap().value().unwrap();
        let expected = 1e-12 * 10_f64.ln();
        assert!(((x - expected) / expected).abs() < 1e-8, "{x}");
    }

    #[test]
    fn statistics() {
        let d = Gamma::new(0, 2., 3.).unwrap();
        assert_eq!(d.mean(), 6.);
        assert_eq!(d.variance(), 18.);
        assert_eq!(d.mode(), Range::single(3.));
        assert_eq!(Gamma::new(0, 0.5, 3.).unwrap().mode(), Range::single(0.));
        assert!(d.mad().unwrap_err().is_undefined());
        let fisher = d.fisher_information().unwrap();
        let psi1 = std::f64::consts::PI.powi(2) / 6. - 1.;
        assert!((fisher[0] - psi1).abs() < 1e-9);
        assert_eq!(fisher[1], fisher[2]);
        assert!((fisher[3] - 2. / 9.).abs() < 1e-15);
        // E[X²] = α(α+1)β²
        assert!((d.moment(2).unwrap() - 54.).abs() < 1e-12);
    }

    #[test]
    fn entropy_reduces_to_exponential() {
        let d = Gamma::new(0, 1., 2.).unwrap();
        assert!((d.entropy(EntropyUnit::Nats) - (1. + 2_f64.ln())).abs() < 1e-10);
    }

    #[test]
    fn kl_divergence() {
        let p = Gamma::new(0, 2., 3.).unwrap();
        assert!(p.kl_divergence(&p).unwrap().abs() < 1e-12);
        // shape 1 on both sides collapses to the exponential formula
        let a = Gamma::new(0, 1., 1.).unwrap();
        let b = Gamma::new(0, 1., 1. / 3.).unwrap();
        let expected = 3. - 1. - 3_f64.ln();
        assert!((a.kl_divergence(&b).unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn sample_moments() {
        let d = Gamma::new(9, 0.7, 2.).unwrap();
        let draws = d.sample_many(40_000);
        assert!(draws.iter().all(|&x| x > 0.));
        let mean = draws.mean().unwrap();
        assert!((mean - 1.4).abs() < 0.05, "{mean}");
    }
}
