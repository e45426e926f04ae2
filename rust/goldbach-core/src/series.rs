//! Truncated series form of the Hardy-Littlewood prediction.
//!
//! r(N) ≈ 2·C₂·S(N) · N / log²N · [1 + a₁/log N + a₂/log²N + a₃/log³N + a₄/log⁴N]

use crate::config::{ExpansionForm, HardyLittlewoodConstants, SeriesConfig};
use crate::error::{require_even_n, Component, EngineError};
use crate::singular::singular_series;

/// Estimator needs log N strictly above this.
pub const MIN_LOG_N: f64 = 2.0;

/// Series-expansion estimator with injected constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesEstimator {
    constants: HardyLittlewoodConstants,
    config: SeriesConfig,
}

impl SeriesEstimator {
    /// Fourth-order additive expansion with the given constants.
    pub fn new(constants: HardyLittlewoodConstants) -> Self {
        Self::with_config(constants, SeriesConfig::default())
    }

    pub fn with_config(constants: HardyLittlewoodConstants, config: SeriesConfig) -> Self {
        Self { constants, config }
    }

    pub fn constants(&self) -> &HardyLittlewoodConstants {
        &self.constants
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    /// Bracketed correction factor for a given log N.
    pub fn correction(&self, log_n: f64) -> f64 {
        let order = self.config.order.min(4) as usize;
        let terms = self.constants.coefficients[..order]
            .iter()
            .enumerate()
            .map(|(k, a)| a / log_n.powi(k as i32 + 1));

        match self.config.form {
            ExpansionForm::Additive => 1.0 + terms.sum::<f64>(),
            ExpansionForm::Factored => terms.map(|t| 1.0 + t).product(),
        }
    }

    /// Predicted G(N) for even N with log N > 2 (N >= 8).
    pub fn estimate(&self, n: u64) -> Result<f64, EngineError> {
        require_even_n(n, Component::SeriesEstimator)?;
        let s = singular_series(n)?;
        self.estimate_with_singular_series(n, s)
    }

    /// Predicted G(N) given an already computed S(N).
    pub fn estimate_with_singular_series(&self, n: u64, singular_series: f64) -> Result<f64, EngineError> {
        require_even_n(n, Component::SeriesEstimator)?;
        let log_n = (n as f64).ln();
        if log_n <= MIN_LOG_N {
            return Err(EngineError::InvalidDomain {
                component: Component::SeriesEstimator,
                n,
                reason: "series expansion needs log N > 2",
            });
        }

        let leading = self.constants.leading_factor(singular_series) * n as f64 / (log_n * log_n);
        Ok(leading * self.correction(log_n))
    }
}

impl Default for SeriesEstimator {
    fn default() -> Self {
        Self::new(HardyLittlewoodConstants::default())
    }
}
