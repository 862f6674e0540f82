//! Error taxonomy shared by special functions, ranges and distributions.
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// An argument or construction parameter lies outside its domain.
    #[error("domain error: {0}")]
    Domain(String),

    /// The distribution is valid but the requested quantity has no
    /// implementation for it.
    #[error("{quantity} is undefined for the {distribution} distribution")]
    Undefined {
        quantity: &'static str,
        distribution: &'static str,
    },
}

impl StatsError {
    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        StatsError::Domain(msg.into())
    }

    pub(crate) fn undefined(quantity: &'static str, distribution: &'static str) -> Self {
        StatsError::Undefined {
            quantity,
            distribution,
        }
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, StatsError::Domain(_))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, StatsError::Undefined { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = StatsError::domain("k must be in [0, n]");
        assert_eq!(e.to_string(), "domain error: k must be in [0, n]");
        assert!(e.is_domain());
        let e = StatsError::undefined("mean absolute deviation", "Weibull");
        assert_eq!(
            e.to_string(),
            "mean absolute deviation is undefined for the Weibull distribution"
        );
        assert!(e.is_undefined());
    }
}
