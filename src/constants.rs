//! Read-only numeric configuration shared by every kernel in the crate.

/// Convergence tolerance for iterative kernels (digamma, bisection quantiles).
pub const EPSILON: f64 = 1e-10;

/// Relative term/sum cut-off for the incomplete gamma series.
pub const SERIES_TOLERANCE: f64 = 1e-15;

/// Default number of Simpson subintervals.
pub const SIMPSON_STEPS: usize = 1000;

/// Beyond this magnitude `erf` saturates to ±1.
pub const ERF_SATURATION: f64 = 40.0;

/// Iteration cap for series and continued fractions that normally converge
/// in a few dozen steps.
pub const MAX_ITERATIONS: usize = 10_000;

/// Mathematical constants used across the crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathConstants {
    pub sqrt_2: f64,
    pub pi: f64,
    pub tau: f64,
    pub e: f64,
    pub euler_mascheroni: f64,
    pub epsilon: f64,
}

pub const CONSTANTS: MathConstants = MathConstants {
    sqrt_2: std::f64::consts::SQRT_2,
    pi: std::f64::consts::PI,
    tau: std::f64::consts::TAU,
    e: std::f64::consts::E,
    euler_mascheroni: 0.577_215_664_901_532_9,
    epsilon: EPSILON,
};

#[cfg(test)]
mod tests {
    use super::*;
    use num::traits::FloatConst;

    #[test]
    fn table_agrees_with_float_const() {
        assert_eq!(CONSTANTS.pi, f64::PI());
        assert_eq!(CONSTANTS.tau, f64::TAU());
        assert_eq!(CONSTANTS.sqrt_2, f64::SQRT_2());
        assert_eq!(CONSTANTS.e, f64::E());
        assert_eq!(CONSTANTS.epsilon, EPSILON);
    }
}
