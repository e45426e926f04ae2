//! One-stop evaluation of a single N against a shared primality table.

use crate::comparison::{compare, ComparisonRecord};
use crate::config::EngineConfig;
use crate::counter::goldbach_count;
use crate::error::{require_even_n, Component, EngineError};
use crate::integral::IntegralEstimator;
use crate::series::SeriesEstimator;
use crate::sieve::PrimalityTable;
use crate::singular::singular_series_sieved;

/// Both estimators plus the comparison settings, built from one config.
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    config: EngineConfig,
    series: SeriesEstimator,
    integral: IntegralEstimator,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            series: SeriesEstimator::with_config(config.constants, config.series),
            integral: IntegralEstimator::new(config.constants, config.quadrature),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn series(&self) -> &SeriesEstimator {
        &self.series
    }

    pub fn integral(&self) -> &IntegralEstimator {
        &self.integral
    }

    /// Count, predict and compare for one even N.
    ///
    /// S(N) is computed once from the table and shared by both estimators.
    pub fn evaluate(&self, n: u64, table: &PrimalityTable) -> Result<ComparisonRecord, EngineError> {
        require_even_n(n, Component::ExactCounter)?;
        let exact = goldbach_count(n, table)?;
        let s = singular_series_sieved(n, table)?;
        let series = self.series.estimate_with_singular_series(n, s)?;
        let integral = self
            .integral
            .estimate_detailed_with_singular_series(n, s)?
            .prediction;

        let record = compare(n, exact, series, integral, &self.config.comparison);
        log::debug!(
            "N = {}: G = {}, series {:.3}, integral {:.3}, winner {}",
            n,
            exact,
            series,
            integral,
            record.winner
        );
        Ok(record)
    }
}
