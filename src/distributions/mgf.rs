//! Moment generating functions as plain values.
use crate::error::Result;
use crate::special::binomial_coefficient;
use serde::{Deserialize, Serialize};

/// Moment generating function `M(t) = E[e^{tX}]` of one distribution,
/// carrying a copy of its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mgf {
    Bernoulli { p: f64 },
    Binomial { trials: u64, p: f64 },
    Poisson { rate: f64 },
    Normal { mean: f64, std_dev: f64 },
    Uniform { min: f64, max: f64 },
    Exponential { rate: f64 },
    Gamma { shape: f64, scale: f64 },
}

impl Mgf {
    /// `M(t)`; `+inf` where the expectation diverges. `M(0)` is exactly 1.
    pub fn evaluate(&self, t: f64) -> f64 {
        if t == 0. {
            return 1.;
        }
        match *self {
            Mgf::Bernoulli { p } => 1. - p + p * t.exp(),
            Mgf::Binomial { trials, p } => (1. - p + p * t.exp()).powf(trials as f64),
            Mgf::Poisson { rate } => (rate * t.exp_m1()).exp(),
            Mgf::Normal { mean, std_dev } => (mean * t + 0.5 * std_dev * std_dev * t * t).exp(),
            Mgf::Uniform { min, max } => ((t * max).exp() - (t * min).exp()) / (t * (max - min)),
            Mgf::Exponential { rate } => {
                if t < rate {
                    rate / (rate - t)
                } else {
                    f64::INFINITY
                }
            }
            Mgf::Gamma { shape, scale } => {
                if t < 1. / scale {
                    (1. - scale * t).powf(-shape)
                } else {
                    f64::INFINITY
                }
            }
        }
    }

    /// `M⁽ⁿ⁾(0)`, the n-th raw moment, from the closed-form derivative.
    pub fn derivative_at_zero(&self, order: u32) -> Result<f64> {
        if order == 0 {
            return Ok(1.);
        }
        let n = order as usize;
        let moment = match *self {
            Mgf::Bernoulli { p } => p,
            Mgf::Binomial { trials, p } => {
                // Σ_j S(n, j)·trials^(j falling)·p^j
                let stirling = stirling_second_kind(n);
                let mut falling = 1.;
                let mut total = 0.;
                for (j, s) in stirling.iter().enumerate().skip(1) {
                    let j_u = j as u64;
                    if j_u > trials {
                        break;
                    }
                    falling *= (trials - j_u + 1) as f64;
                    total += s * falling * p.powi(j as i32);
                }
                total
            }
            Mgf::Poisson { rate } => stirling_second_kind(n)
                .iter()
                .enumerate()
                .map(|(j, s)| s * rate.powi(j as i32))
                .sum(),
            Mgf::Normal { mean, std_dev } => {
                let mut total = 0.;
                let mut double_factorial = 1.;
                for k in 0..=n / 2 {
                    if k > 0 {
                        double_factorial *= (2 * k - 1) as f64;
                    }
                    total += binomial_coefficient(n as i64, 2 * k as i64)?
                        * mean.powi((n - 2 * k) as i32)
                        * std_dev.powi(2 * k as i32)
                        * double_factorial;
                }
                total
            }
            Mgf::Uniform { min, max } => {
                let m = n as i32 + 1;
                (max.powi(m) - min.powi(m)) / (m as f64 * (max - min))
            }
            Mgf::Exponential { rate } => (1..=n).fold(1., |acc, i| acc * i as f64 / rate),
            Mgf::Gamma { shape, scale } => {
                (0..n).fold(1., |acc, i| acc * (shape + i as f64) * scale)
            }
        };
        Ok(moment)
    }
}

/// Row `n` of the Stirling numbers of the second kind, `S(n, 0..=n)`.
fn stirling_second_kind(n: usize) -> Vec<f64> {
    let mut row = vec![1.];
    for i in 1..=n {
        let mut next = vec![0.; i + 1];
        for j in 1..=i {
            let carried = if j < i { j as f64 * row[j] } else { 0. };
            next[j] = carried + row[j - 1];
        }
        row = next;
    }
    row
}
