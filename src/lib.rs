//! `probdist` provides univariate probability distributions (Bernoulli,
//! Binomial, Poisson, Normal, Uniform, Exponential, Gamma and Weibull) behind
//! a single [`Distribution`] trait, together with the special functions,
//! numeric integration and range algebra they are built on.
//!
//! Every distribution owns a seeded generator, so two instances built with
//! the same seed produce the same variates.
//!
//! ```
//! use probdist::{Binomial, Distribution};
//!
//! let d = Binomial::new(42, 10, 0.65)?;
//! let p = d.pdf(9.)?.value().unwrap_or(f64::NAN);
//! assert!((p - 0.0725).abs() < 1e-4);
//! # Ok::<(), probdist::StatsError>(())
//! ```
pub mod constants;
pub mod distributions;
pub mod error;
pub mod integrate;
pub mod random;
pub mod range;
pub mod special;

pub use distributions::{
    Bernoulli, Binomial, Distribution, Exponential, Gamma, Kind, Mgf, Moments, Normal, Poisson,
    Uniform, Weibull,
};
pub use error::{Result, StatsError};
pub use range::Range;
pub use special::{EntropyUnit, ErfMethod};

/// `erf`/`erfc` family of error functions
///
/// `erf` and `erfc` are evaluated here; the inverse comes from
/// [statrs](https://crates.io/crates/statrs).
pub mod gauss {
    pub use crate::special::{erf, erfc};
    pub use statrs::function::erf::erfc_inv;
}
