//! Exact Goldbach partition counts and the Hardy-Littlewood predictors.
//!
//! The engine counts ordered prime pairs G(N) = #{(p, q) : p + q = N} from a
//! sieve built once per batch, evaluates two asymptotic predictions scaled by
//! 2·C₂·S(N), and compares their relative bias per N and per decade band:
//!
//! - [`sieve`]: primality table shared read-only by everything else
//! - [`singular`]: singular series S(N) over odd prime divisors
//! - [`counter`]: exact ordered count G(N)
//! - [`series`]: fourth-order truncated series N/log²N · [1 + Σ aₖ/logᵏN]
//! - [`integral`]: ∫₂^(N−2) dt / (log t · log(N−t)) by adaptive quadrature
//! - [`comparison`]: bias, winner, advantage ratio, decade bands, crossover
//! - [`engine`]: all of the above for one N

pub mod comparison;
pub mod config;
pub mod counter;
pub mod engine;
pub mod error;
pub mod integral;
pub mod quadrature;
pub mod series;
pub mod sieve;
pub mod singular;

pub use comparison::{
    aggregate_bands, compare, summarize, ComparisonRecord, ScaleBandSummary, SweepSummary, Winner,
};
pub use config::{
    ComparisonConfig, EngineConfig, ExpansionForm, HardyLittlewoodConstants, QuadratureConfig,
    SeriesConfig, SERIES_COEFFICIENTS, TWIN_PRIME_CONSTANT,
};
pub use counter::{goldbach_count, goldbach_pairs};
pub use engine::Engine;
pub use error::{Component, EngineError};
pub use integral::{IntegralEstimate, IntegralEstimator};
pub use series::SeriesEstimator;
pub use sieve::PrimalityTable;
pub use singular::{singular_series, singular_series_sieved};
