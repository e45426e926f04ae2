//! Error taxonomy shared by every engine component.

use serde::Serialize;
use std::fmt;

/// The engine component that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Component {
    PrimeSieve,
    SingularSeries,
    ExactCounter,
    SeriesEstimator,
    IntegralEstimator,
    Comparison,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::PrimeSieve => write!(f, "prime sieve"),
            Component::SingularSeries => write!(f, "singular series"),
            Component::ExactCounter => write!(f, "exact counter"),
            Component::SeriesEstimator => write!(f, "series estimator"),
            Component::IntegralEstimator => write!(f, "integral estimator"),
            Component::Comparison => write!(f, "comparison"),
        }
    }
}

/// Recoverable failures, each tagged with the offending N and component.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum EngineError {
    #[error("{component}: N = {n} is not an even integer >= 4")]
    InvalidInput { component: Component, n: u64 },

    #[error("{component}: N = {n} is outside the formula's domain ({reason})")]
    InvalidDomain {
        component: Component,
        n: u64,
        reason: &'static str,
    },

    #[error(
        "{component}: quadrature for N = {n} did not converge after {subdivisions} subdivisions \
         (error estimate {error_estimate:e}, tolerance {tolerance:e})"
    )]
    NumericalNonconvergence {
        component: Component,
        n: u64,
        subdivisions: usize,
        error_estimate: f64,
        tolerance: f64,
    },

    #[error("{component}: G(N) = 0 for N = {n}, bias is undefined")]
    DivisionDegenerate { component: Component, n: u64 },

    #[error("{component}: primality table covers up to {bound}, N = {n} needs {required}")]
    TableTooSmall {
        component: Component,
        n: u64,
        bound: u64,
        required: u64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// The N this error is about, if it concerns a specific N.
    pub fn n(&self) -> Option<u64> {
        match self {
            EngineError::InvalidInput { n, .. }
            | EngineError::InvalidDomain { n, .. }
            | EngineError::NumericalNonconvergence { n, .. }
            | EngineError::DivisionDegenerate { n, .. }
            | EngineError::TableTooSmall { n, .. } => Some(*n),
            EngineError::InvalidConfig(_) => None,
        }
    }

    /// The component that raised this error, if any.
    pub fn component(&self) -> Option<Component> {
        match self {
            EngineError::InvalidInput { component, .. }
            | EngineError::InvalidDomain { component, .. }
            | EngineError::NumericalNonconvergence { component, .. }
            | EngineError::DivisionDegenerate { component, .. }
            | EngineError::TableTooSmall { component, .. } => Some(*component),
            EngineError::InvalidConfig(_) => None,
        }
    }
}

/// Reject anything that is not an even integer >= 4.
pub(crate) fn require_even_n(n: u64, component: Component) -> Result<(), EngineError> {
    use num_integer::Integer;

    if n < 4 || n.is_odd() {
        return Err(EngineError::InvalidInput { component, n });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_even_n() {
        assert!(require_even_n(4, Component::ExactCounter).is_ok());
        assert!(require_even_n(100, Component::ExactCounter).is_ok());
        for n in [0u64, 1, 2, 3, 5, 99] {
            assert_eq!(
                require_even_n(n, Component::SingularSeries),
                Err(EngineError::InvalidInput {
                    component: Component::SingularSeries,
                    n
                })
            );
        }
    }

    #[test]
    fn test_error_tags() {
        let err = EngineError::DivisionDegenerate {
            component: Component::Comparison,
            n: 2,
        };
        assert_eq!(err.n(), Some(2));
        assert_eq!(err.component(), Some(Component::Comparison));
        assert!(err.to_string().contains("N = 2"));
        assert_eq!(EngineError::InvalidConfig("x".into()).n(), None);
    }
}
