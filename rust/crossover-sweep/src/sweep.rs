//! Batched evaluation: one sieve, many N.
//!
//! The primality table is built once for the largest N of the plan and then
//! shared read-only, either sequentially or across rayon workers. A failing N
//! is logged and recorded, never fatal to the sweep; that includes N beyond
//! `max_sieve_bound`, which are never sieved.

use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use goldbach_core::{
    aggregate_bands, summarize, ComparisonRecord, Component, Engine, EngineConfig, EngineError,
    PrimalityTable, ScaleBandSummary, SweepSummary,
};

use crate::error::SweepError;
use crate::sampling::SamplingPlan;

/// Sweep settings.
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    pub engine: EngineConfig,
    /// Fan out across N with rayon.
    pub parallel: bool,
    /// Log progress every this many N; 0 disables progress lines.
    pub progress_every: usize,
    /// Largest sieve the sweep will build. Larger N are reported as failures.
    pub max_sieve_bound: u64,
}

/// One byte per integer, so 10⁹ is about 1 GB of table.
pub const DEFAULT_MAX_SIEVE_BOUND: u64 = 1_000_000_000;

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            parallel: false,
            progress_every: 100,
            max_sieve_bound: DEFAULT_MAX_SIEVE_BOUND,
        }
    }
}

/// An N the sweep skipped, and why.
#[derive(Debug, Clone, Serialize)]
pub struct SweepFailure {
    pub n: u64,
    pub message: String,
    pub error: EngineError,
}

/// Everything a sweep produced.
#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub plan: SamplingPlan,
    pub config: EngineConfig,
    pub sieve_bound: u64,
    pub primes_sieved: usize,
    pub sieve_secs: f64,
    pub evaluation_secs: f64,
    pub records: Vec<ComparisonRecord>,
    pub bands: Vec<ScaleBandSummary>,
    pub summary: SweepSummary,
    pub failures: Vec<SweepFailure>,
}

/// Progress lines with elapsed time, rate and remaining estimate.
struct Progress {
    total: usize,
    every: usize,
    done: AtomicUsize,
    start: Instant,
}

impl Progress {
    fn new(total: usize, every: usize) -> Self {
        Self {
            total,
            every,
            done: AtomicUsize::new(0),
            start: Instant::now(),
        }
    }

    fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if self.every == 0 || (done % self.every != 0 && done != self.total) {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 { done as f64 / elapsed } else { 0.0 };
        let remaining = if rate > 0.0 {
            (self.total - done) as f64 / rate
        } else {
            0.0
        };
        log::info!(
            "progress: {}/{} ({:.1}%) - {:.0}s elapsed, ~{:.0}s remaining",
            done,
            self.total,
            100.0 * done as f64 / self.total as f64,
            elapsed,
            remaining
        );
    }
}

/// Evaluate every N against one shared table, in the order given.
pub fn evaluate_all(
    engine: &Engine,
    table: &PrimalityTable,
    points: &[u64],
    config: &SweepConfig,
) -> Vec<(u64, Result<ComparisonRecord, EngineError>)> {
    let progress = Progress::new(points.len(), config.progress_every);
    let eval = |&n: &u64| {
        let outcome = engine.evaluate(n, table);
        progress.tick();
        (n, outcome)
    };

    if config.parallel {
        points.par_iter().map(eval).collect()
    } else {
        points.iter().map(eval).collect()
    }
}

/// Run a whole sweep: sieve once, evaluate, aggregate.
pub fn run_sweep(plan: &SamplingPlan, config: &SweepConfig) -> Result<SweepReport, SweepError> {
    let engine = Engine::new(config.engine)?;
    let mut points = plan.points();
    if points.is_empty() {
        return Err(SweepError::EmptyPlan);
    }

    // Points are sorted, so the oversized ones form the tail.
    let fits = points.partition_point(|&n| n <= config.max_sieve_bound);
    let oversized = points.split_off(fits);
    let max_n = points.last().copied().unwrap_or(0);

    log::info!("building primality table up to {}", max_n);
    let sieve_start = Instant::now();
    let table = PrimalityTable::new(max_n);
    let sieve_secs = sieve_start.elapsed().as_secs_f64();
    let primes_sieved = table.prime_count();
    log::info!("sieved {} primes in {:.1}s", primes_sieved, sieve_secs);

    log::info!(
        "evaluating {} points{}",
        points.len(),
        if config.parallel { " in parallel" } else { "" }
    );
    let eval_start = Instant::now();
    let outcomes = evaluate_all(&engine, &table, &points, config);
    let evaluation_secs = eval_start.elapsed().as_secs_f64();

    let mut records = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (n, outcome) in outcomes {
        match outcome {
            Ok(record) => {
                if let Some(degenerate) = record.degenerate() {
                    log::warn!("N = {}: {}", n, degenerate);
                }
                records.push(record);
            }
            Err(error) => {
                log::warn!("skipping N = {}: {}", n, error);
                failures.push(SweepFailure {
                    n,
                    message: error.to_string(),
                    error,
                });
            }
        }
    }

    for n in oversized {
        let error = EngineError::TableTooSmall {
            component: Component::ExactCounter,
            n,
            bound: config.max_sieve_bound,
            required: n.saturating_sub(2),
        };
        log::warn!("skipping N = {}: exceeds the sieve limit {}", n, config.max_sieve_bound);
        failures.push(SweepFailure {
            n,
            message: error.to_string(),
            error,
        });
    }

    let bands = aggregate_bands(&records, &config.engine.comparison);
    let summary = summarize(&records);

    Ok(SweepReport {
        plan: plan.clone(),
        config: config.engine,
        sieve_bound: table.bound(),
        primes_sieved,
        sieve_secs,
        evaluation_secs,
        records,
        bands,
        summary,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_do_not_abort() {
        let plan = SamplingPlan::Explicit(vec![3, 6, 10, 1_000]);
        let report = run_sweep(&plan, &SweepConfig::default()).unwrap();
        assert_eq!(report.sieve_bound, 1_000);
        assert_eq!(report.records.iter().map(|r| r.n).collect::<Vec<_>>(), vec![10, 1_000]);
        let failed: Vec<u64> = report.failures.iter().map(|f| f.n).collect();
        assert_eq!(failed, vec![3, 6]);
        assert!(matches!(report.failures[0].error, EngineError::InvalidInput { .. }));
        assert!(matches!(report.failures[1].error, EngineError::InvalidDomain { .. }));
    }

    #[test]
    fn test_oversized_n_is_a_failure_not_an_abort() {
        let plan = SamplingPlan::Explicit(vec![1_000, u64::MAX - 1]);
        let report = run_sweep(&plan, &SweepConfig::default()).unwrap();
        assert_eq!(report.sieve_bound, 1_000);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].n, u64::MAX - 1);
        assert!(matches!(
            report.failures[0].error,
            EngineError::TableTooSmall {
                bound: DEFAULT_MAX_SIEVE_BOUND,
                ..
            }
        ));
    }

    #[test]
    fn test_sieve_limit_is_configurable() {
        let plan = SamplingPlan::Explicit(vec![3, 1_000, 4_000, 10_000]);
        let config = SweepConfig {
            max_sieve_bound: 5_000,
            ..SweepConfig::default()
        };
        let report = run_sweep(&plan, &config).unwrap();
        assert_eq!(report.sieve_bound, 4_000);
        assert_eq!(report.records.iter().map(|r| r.n).collect::<Vec<_>>(), vec![1_000, 4_000]);
        let failed: Vec<u64> = report.failures.iter().map(|f| f.n).collect();
        assert_eq!(failed, vec![3, 10_000]);

        let all_too_big = SamplingPlan::Explicit(vec![10_000]);
        let report = run_sweep(&all_too_big, &config).unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_empty_plan() {
        let err = run_sweep(&SamplingPlan::Explicit(vec![]), &SweepConfig::default()).unwrap_err();
        assert!(matches!(err, SweepError::EmptyPlan));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let plan = SamplingPlan::Range {
            start: 1_000,
            end: 40_000,
            step: 1_000,
        };
        let sequential = run_sweep(&plan, &SweepConfig::default()).unwrap();
        let parallel = run_sweep(
            &plan,
            &SweepConfig {
                parallel: true,
                ..SweepConfig::default()
            },
        )
        .unwrap();
        assert_eq!(sequential.records, parallel.records);
        assert_eq!(sequential.bands, parallel.bands);
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let mut config = SweepConfig::default();
        config.engine.quadrature.rel_tol = -1.0;
        let err = run_sweep(&SamplingPlan::Explicit(vec![100]), &config).unwrap_err();
        assert!(matches!(err, SweepError::Engine(EngineError::InvalidConfig(_))));
    }
}
