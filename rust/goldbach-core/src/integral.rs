//! Logarithmic-integral form of the Hardy-Littlewood prediction.
//!
//! r(N) ≈ 2·C₂·S(N) · ∫₂^(N−2) dt / (log t · log(N − t))

use crate::config::{HardyLittlewoodConstants, QuadratureConfig};
use crate::error::{require_even_n, Component, EngineError};
use crate::quadrature::{integrate, Quadrature};
use crate::singular::singular_series;

/// A prediction together with the quadrature diagnostics behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegralEstimate {
    pub prediction: f64,
    /// The bare integral, before scaling by 2·C₂·S(N).
    pub integral: f64,
    /// Quadrature error estimate, scaled like the prediction.
    pub error_estimate: f64,
    pub subdivisions: usize,
}

/// Integral estimator with injected constants and tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegralEstimator {
    constants: HardyLittlewoodConstants,
    quadrature: QuadratureConfig,
}

impl IntegralEstimator {
    pub fn new(constants: HardyLittlewoodConstants, quadrature: QuadratureConfig) -> Self {
        Self {
            constants,
            quadrature,
        }
    }

    pub fn constants(&self) -> &HardyLittlewoodConstants {
        &self.constants
    }

    pub fn quadrature(&self) -> &QuadratureConfig {
        &self.quadrature
    }

    /// ∫₂^(N−2) dt / (log t · log(N − t)) for even N >= 4.
    pub fn log_integral(&self, n: u64) -> Result<Quadrature, EngineError> {
        require_even_n(n, Component::IntegralEstimator)?;
        let upper = (n - 2) as f64;
        let nf = n as f64;

        let q = integrate(|t| 1.0 / (t.ln() * (nf - t).ln()), 2.0, upper, &self.quadrature)
            .map_err(|failure| EngineError::NumericalNonconvergence {
                component: Component::IntegralEstimator,
                n,
                subdivisions: failure.subdivisions,
                error_estimate: failure.error_estimate,
                tolerance: failure.tolerance,
            })?;

        log::debug!(
            "N = {}: integral {:.6} (error {:.2e}, {} subdivisions)",
            n,
            q.value,
            q.error_estimate,
            q.subdivisions
        );
        Ok(q)
    }

    /// Full estimate with diagnostics, given an already computed S(N).
    pub fn estimate_detailed_with_singular_series(
        &self,
        n: u64,
        singular_series: f64,
    ) -> Result<IntegralEstimate, EngineError> {
        let q = self.log_integral(n)?;
        let factor = self.constants.leading_factor(singular_series);
        Ok(IntegralEstimate {
            prediction: factor * q.value,
            integral: q.value,
            error_estimate: factor * q.error_estimate,
            subdivisions: q.subdivisions,
        })
    }

    /// Full estimate with diagnostics.
    pub fn estimate_detailed(&self, n: u64) -> Result<IntegralEstimate, EngineError> {
        require_even_n(n, Component::IntegralEstimator)?;
        let s = singular_series(n)?;
        self.estimate_detailed_with_singular_series(n, s)
    }

    /// Predicted G(N) for even N >= 4.
    pub fn estimate(&self, n: u64) -> Result<f64, EngineError> {
        self.estimate_detailed(n).map(|e| e.prediction)
    }
}

impl Default for IntegralEstimator {
    fn default() -> Self {
        Self::new(HardyLittlewoodConstants::default(), QuadratureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_n_four_is_empty_interval() {
        let est = IntegralEstimator::default();
        let e = est.estimate_detailed(4).unwrap();
        assert_eq!(e.prediction, 0.0);
        assert_eq!(e.subdivisions, 0);
    }

    #[test]
    fn test_rejects_invalid_n() {
        let est = IntegralEstimator::default();
        for n in [0u64, 2, 3, 9] {
            assert!(matches!(
                est.estimate(n),
                Err(EngineError::InvalidInput {
                    component: Component::IntegralEstimator,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_known_values() {
        let est = IntegralEstimator::default();
        let cases = [
            (1_000u64, 42.9648),
            (10_000, 216.5696),
            (100_000, 1302.3328),
            (1_000_000, 8706.0253),
        ];
        for (n, expected) in cases {
            let got = est.estimate(n).unwrap();
            assert!((got - expected).abs() < 1e-3, "N = {}: {} vs {}", n, got, expected);
        }
    }

    #[test]
    fn test_meets_relative_tolerance() {
        let est = IntegralEstimator::default();
        for n in [100u64, 10_000, 100_000_000] {
            let e = est.estimate_detailed(n).unwrap();
            assert!(e.error_estimate <= 1e-10 * e.prediction + 1e-9, "N = {}: {:?}", n, e);
            assert!(e.subdivisions <= 200);
        }
    }

    #[test]
    fn test_integral_bounded_by_endpoint_values() {
        // 1/(log t · log(N−t)) is smallest at the midpoint and largest at the ends.
        let est = IntegralEstimator::default();
        for n in [50u64, 1_000, 99_998] {
            let i = est.log_integral(n).unwrap().value;
            let width = (n - 4) as f64;
            let mid = (n as f64 / 2.0).ln();
            let lo = width / (mid * mid);
            let hi = width / (2f64.ln() * ((n - 2) as f64).ln());
            assert!(i > lo && i < hi, "N = {}: {} not in ({}, {})", n, i, lo, hi);
        }
    }

    #[test]
    fn test_prediction_scales_bare_integral() {
        let est = IntegralEstimator::default();
        for n in [1_000u64, 100_000] {
            let q = est.log_integral(n).unwrap();
            let s = singular_series(n).unwrap();
            let e = est.estimate_detailed(n).unwrap();
            let factor = est.constants().leading_factor(s);
            assert_eq!(e.integral, q.value);
            assert_eq!(e.prediction, factor * q.value);
            assert_eq!(e.error_estimate, factor * q.error_estimate);
            assert_eq!(e.subdivisions, q.subdivisions);
            assert!(e.prediction > e.integral);
        }
    }

    #[test]
    fn test_nonconvergence_is_an_error() {
        let est = IntegralEstimator::new(
            HardyLittlewoodConstants::default(),
            QuadratureConfig {
                rel_tol: 0.0,
                abs_tol: 0.0,
                max_subdivisions: 3,
            },
        );
        match est.estimate(100_000) {
            Err(EngineError::NumericalNonconvergence { n, subdivisions, .. }) => {
                assert_eq!(n, 100_000);
                assert_eq!(subdivisions, 3);
            }
            other => panic!("expected nonconvergence, got {:?}", other),
        }
    }

    #[test]
    fn test_deterministic() {
        let est = IntegralEstimator::default();
        for n in [10u64, 123_456, 10_000_000] {
            let a = est.estimate(n).unwrap();
            let b = est.estimate(n).unwrap();
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
