//! Scaling benchmarks for the Goldbach engine.
//!
//! Times each stage (sieve, exact count, singular series, both estimators) on
//! N of increasing size and fits empirical complexity exponents from the
//! log-log slope. Ends with a sequential vs parallel sweep comparison.
//!
//! Usage: scaling [--max-exp=7] [--samples=5]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::time::Instant;

use crossover_sweep::{run_sweep, SamplingPlan, SweepConfig};
use goldbach_core::{
    goldbach_count, singular_series_sieved, IntegralEstimator, PrimalityTable, SeriesEstimator,
};

/// Per-stage timings at one N, in microseconds.
struct StageTimes {
    n: u64,
    count_us: f64,
    singular_us: f64,
    series_us: f64,
    integral_us: f64,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts: HashMap<String, String> = args
        .iter()
        .filter_map(|a| a.strip_prefix("--"))
        .filter_map(|kv| kv.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let max_exp: u32 = opts
        .get("max-exp")
        .and_then(|v| v.parse().ok())
        .unwrap_or(7)
        .clamp(3, 9);
    let samples: usize = opts
        .get("samples")
        .and_then(|v| v.parse().ok())
        .unwrap_or(5)
        .max(1);

    println!("================================================================");
    println!("  SCALING BENCHMARKS: Goldbach engine stages, N = 10^3..10^{}", max_exp);
    println!("================================================================\n");

    let bounds: Vec<u64> = (3..=max_exp).map(|e| 10u64.pow(e)).collect();

    bench_sieve(&bounds);

    let max_n = bounds.last().copied().unwrap_or(1_000);
    let table = PrimalityTable::new(max_n);
    let times = bench_stages(&table, &bounds, samples);

    println!("\n  Empirical exponents (time ~ N^k):");
    let ns: Vec<f64> = times.iter().map(|t| t.n as f64).collect();
    let fits = [
        ("exact count", times.iter().map(|t| t.count_us).collect::<Vec<_>>()),
        ("singular series", times.iter().map(|t| t.singular_us).collect()),
        ("series", times.iter().map(|t| t.series_us).collect()),
        ("integral", times.iter().map(|t| t.integral_us).collect()),
    ];
    for (name, ys) in &fits {
        match fit_exponent(&ns, ys) {
            Some(k) => println!("    {:<16} k = {:.2}", name, k),
            None => println!("    {:<16} k = -", name),
        }
    }

    bench_sweep_parallelism(max_n.min(1_000_000));
}

fn bench_sieve(bounds: &[u64]) {
    println!("  Sieve of Eratosthenes");
    println!("  {:>12} {:>12} {:>12}", "bound", "primes", "time_ms");
    println!("  {}", "-".repeat(40));
    for &bound in bounds {
        let start = Instant::now();
        let table = PrimalityTable::new(bound);
        let elapsed = start.elapsed();
        println!(
            "  {:>12} {:>12} {:>12.2}",
            bound,
            table.prime_count(),
            elapsed.as_secs_f64() * 1e3
        );
    }
    println!();
}

/// Mean per-stage time over `samples` random even N in each decade.
fn bench_stages(table: &PrimalityTable, bounds: &[u64], samples: usize) -> Vec<StageTimes> {
    let mut rng = StdRng::seed_from_u64(12345);
    let series = SeriesEstimator::default();
    let integral = IntegralEstimator::default();

    println!("  Per-N stages (mean of {} even N per decade)", samples);
    println!(
        "  {:>12} {:>12} {:>12} {:>12} {:>12}",
        "N~", "count_us", "S(N)_us", "series_us", "integral_us"
    );
    println!("  {}", "-".repeat(66));

    let mut rows = Vec::new();
    for &upper in bounds {
        let lower = (upper / 10).max(8);
        let mut acc = [0.0f64; 4];
        let mut done = 0usize;

        for _ in 0..samples {
            let n = 2 * rng.gen_range(lower / 2..=upper / 2);
            let t0 = Instant::now();
            let count = goldbach_count(n, table);
            let t1 = Instant::now();
            let s = singular_series_sieved(n, table);
            let t2 = Instant::now();
            let pred_series = s.as_ref().map(|&s| series.estimate_with_singular_series(n, s));
            let t3 = Instant::now();
            let pred_integral = s
                .as_ref()
                .map(|&s| integral.estimate_detailed_with_singular_series(n, s));
            let t4 = Instant::now();

            if count.is_err() || !matches!(pred_series, Ok(Ok(_))) || !matches!(pred_integral, Ok(Ok(_))) {
                log::warn!("N = {} failed a stage, dropped from the timing", n);
                continue;
            }
            acc[0] += (t1 - t0).as_secs_f64() * 1e6;
            acc[1] += (t2 - t1).as_secs_f64() * 1e6;
            acc[2] += (t3 - t2).as_secs_f64() * 1e6;
            acc[3] += (t4 - t3).as_secs_f64() * 1e6;
            done += 1;
        }

        if done == 0 {
            println!("  {:>12} {:>12}", upper, "SKIP");
            continue;
        }
        let k = done as f64;
        let row = StageTimes {
            n: upper,
            count_us: acc[0] / k,
            singular_us: acc[1] / k,
            series_us: acc[2] / k,
            integral_us: acc[3] / k,
        };
        println!(
            "  {:>12} {:>12.1} {:>12.2} {:>12.3} {:>12.1}",
            row.n, row.count_us, row.singular_us, row.series_us, row.integral_us
        );
        rows.push(row);
    }
    rows
}

/// Least-squares slope of log(y) against log(x).
fn fit_exponent(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(_, y)| **y > 0.0)
        .map(|(&x, &y)| (x.ln(), y.ln()))
        .collect();
    if points.len() < 2 {
        return None;
    }
    let m = points.len() as f64;
    let mx = points.iter().map(|p| p.0).sum::<f64>() / m;
    let my = points.iter().map(|p| p.1).sum::<f64>() / m;
    let sxx: f64 = points.iter().map(|p| (p.0 - mx).powi(2)).sum();
    let sxy: f64 = points.iter().map(|p| (p.0 - mx) * (p.1 - my)).sum();
    if sxx == 0.0 {
        None
    } else {
        Some(sxy / sxx)
    }
}

fn bench_sweep_parallelism(max_n: u64) {
    println!("\n================================================================");
    println!("  SWEEP: sequential vs parallel, stratified grid up to {}", max_n);
    println!("================================================================\n");

    let plan = SamplingPlan::Stratified { min_n: 1_000, max_n };
    for parallel in [false, true] {
        let config = SweepConfig {
            parallel,
            progress_every: 0,
            ..SweepConfig::default()
        };
        match run_sweep(&plan, &config) {
            Ok(report) => println!(
                "  {:<10} {:>6} points, sieve {:.3}s, evaluation {:.3}s",
                if parallel { "parallel" } else { "sequential" },
                report.records.len(),
                report.sieve_secs,
                report.evaluation_secs
            ),
            Err(e) => println!("  sweep failed: {}", e),
        }
    }
}
