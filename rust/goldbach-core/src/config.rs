//! Immutable configuration injected into the estimators and the comparison.
//!
//! Every struct has a `Default` carrying the literature values, and the whole
//! bundle loads from JSON so runs with different constants can be reproduced
//! side by side.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::EngineError;

/// Hardy-Littlewood twin-prime constant C₂.
pub const TWIN_PRIME_CONSTANT: f64 = 0.660_161_815_846_869_6;

/// Fourth-order series coefficients a₁..a₄.
pub const SERIES_COEFFICIENTS: [f64; 4] = [2.0, 2.0, 4.0 / 3.0, 2.0 / 3.0];

/// Constants shared by both estimators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardyLittlewoodConstants {
    /// C₂; estimators scale by 2·C₂·S(N).
    pub twin_prime: f64,
    /// a₁..a₄ of the series expansion.
    pub coefficients: [f64; 4],
}

impl Default for HardyLittlewoodConstants {
    fn default() -> Self {
        Self {
            twin_prime: TWIN_PRIME_CONSTANT,
            coefficients: SERIES_COEFFICIENTS,
        }
    }
}

impl HardyLittlewoodConstants {
    /// Leading factor 2·C₂·S(N) for a given singular series value.
    pub fn leading_factor(&self, singular_series: f64) -> f64 {
        2.0 * self.twin_prime * singular_series
    }
}

/// How the correction terms of the series are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionForm {
    /// 1 + a₁/L + a₂/L² + a₃/L³ + a₄/L⁴
    Additive,
    /// (1 + a₁/L)(1 + a₂/L²)(1 + a₃/L³)(1 + a₄/L⁴)
    Factored,
}

/// Series truncation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// Number of correction terms kept, 0..=4.
    pub order: u8,
    pub form: ExpansionForm,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            order: 4,
            form: ExpansionForm::Additive,
        }
    }
}

/// Tolerance and budget for the adaptive quadrature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadratureConfig {
    /// Relative tolerance on the integral.
    pub rel_tol: f64,
    /// Absolute tolerance on the integral.
    pub abs_tol: f64,
    /// Maximum number of bisections before giving up.
    pub max_subdivisions: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            rel_tol: 1e-10,
            abs_tol: 1e-12,
            max_subdivisions: 200,
        }
    }
}

/// Winner classification settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// |bias| values closer than this many percentage points are a parity.
    pub parity_epsilon_pct: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            parity_epsilon_pct: 0.01,
        }
    }
}

/// Everything the engine needs besides the primality table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub constants: HardyLittlewoodConstants,
    pub series: SeriesConfig,
    pub quadrature: QuadratureConfig,
    pub comparison: ComparisonConfig,
}

impl EngineConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EngineError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse a config from JSON text and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidConfig(format!("malformed config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the estimators cannot work with.
    pub fn validate(&self) -> Result<(), EngineError> {
        let c = &self.constants;
        if !c.twin_prime.is_finite() || c.twin_prime <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "twin prime constant must be positive and finite, got {}",
                c.twin_prime
            )));
        }
        if let Some(a) = c.coefficients.iter().find(|a| !a.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "series coefficient must be finite, got {}",
                a
            )));
        }
        if self.series.order > 4 {
            return Err(EngineError::InvalidConfig(format!(
                "series order must be at most 4, got {}",
                self.series.order
            )));
        }
        let q = &self.quadrature;
        if !(q.rel_tol >= 0.0 && q.abs_tol >= 0.0) || !q.rel_tol.is_finite() || !q.abs_tol.is_finite() {
            return Err(EngineError::InvalidConfig(format!(
                "quadrature tolerances must be finite and non-negative, got rel {} abs {}",
                q.rel_tol, q.abs_tol
            )));
        }
        let eps = self.comparison.parity_epsilon_pct;
        if !eps.is_finite() || eps < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "parity epsilon must be finite and non-negative, got {}",
                eps
            )));
        }
        Ok(())
    }
}
