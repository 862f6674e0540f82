//! Fixed-step numerical integration.
use crate::constants::SIMPSON_STEPS;
use crate::error::{Result, StatsError};
use ndarray::Array1;

/// Composite Simpson's rule over `[min, max]` with `n` subintervals.
///
/// Weights run `1, 4, 2, 4, ..., 2, 4, 1` and the result is
/// `(h/3)·Σ wᵢ f(xᵢ)`. An odd `n` is bumped to the next even number. There is
/// no adaptive refinement; pass a larger `n` for more accuracy.
pub fn simpson<F>(f: F, min: f64, max: f64, n: usize) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    if n == 0 {
        return Err(StatsError::domain("simpson requires at least one subinterval"));
    }
    if !min.is_finite() || !max.is_finite() {
        return Err(StatsError::domain(format!(
            "simpson requires finite bounds, got [{min}, {max}]"
        )));
    }
    let n = n + n % 2;
    let h = (max - min) / n as f64;
    let nodes = Array1::linspace(min, max, n + 1);
    let weights = Array1::from_shape_fn(n + 1, |i| match i {
        0 => 1.,
        i if i == n => 1.,
        i if i % 2 == 1 => 4.,
        _ => 2.,
    });
    Ok(h / 3. * nodes.mapv(f).dot(&weights))
}

/// [`simpson`] with the crate-wide default of 1000 subintervals.
pub fn simpson_default<F>(f: F, min: f64, max: f64) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    simpson(f, min, max, SIMPSON_STEPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::traits::FloatConst;

    #[test]
    fn integrates_cubic_exactly() {
        // Simpson is exact for polynomials up to degree three
        let v = simpson(|x| x.powi(3) - 2. * x + 1., -1., 2., 2).unwrap();
        assert!((v - 3.75).abs() < 1e-12);
    }

    #[test]
    fn integrates_sine() {
        let v = simpson_default(f64::sin, 0., f64::PI()).unwrap();
        assert!((v - 2.).abs() < 1e-10);
    }

    #[test]
    fn odd_step_count_is_rounded_up() {
        let odd = simpson(f64::exp, 0., 1., 7).unwrap();
        let even = simpson(f64::exp, 0., 1., 8).unwrap();
        assert_eq!(odd, even);
    }

    #[test]
    fn reversed_bounds_flip_sign() {
        let forward = simpson_default(|x| x * x, 0., 3.).unwrap();
        let backward = simpson_default(|x| x * x, 3., 0.).unwrap();
        assert!((forward + backward).abs() < 1e-12);
        assert!((forward - 9.).abs() < 1e-10);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(simpson(|x| x, 0., 1., 0).unwrap_err().is_domain());
        assert!(simpson(|x| x, 0., f64::INFINITY, 10).is_err());
    }
}
