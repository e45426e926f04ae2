//! Crossover sweep: which Hardy-Littlewood form tracks G(N) better, and where
//! does that change?
//!
//! Builds on `goldbach-core`: a [`sampling::SamplingPlan`] picks the even N,
//! [`sweep::run_sweep`] sieves once and evaluates them all, and [`output`]
//! writes the per-N and per-band tables plus a JSON report.

pub mod error;
pub mod output;
pub mod sampling;
pub mod sweep;

pub use error::SweepError;
pub use sampling::SamplingPlan;
pub use sweep::{run_sweep, SweepConfig, SweepFailure, SweepReport};
