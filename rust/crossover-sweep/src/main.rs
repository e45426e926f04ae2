//! crossover-sweep CLI
//!
//! Usage:
//!   crossover-sweep --mode=sweep [--plan=stratified|range|random] [--min-n=1000] [--max-n=100000]
//!                   [--step=1000] [--samples-per-decade=50] [--seed=N] [--parallel]
//!                   [--output=results/goldbach_data.csv] [--report=results/goldbach_report.json]
//!   crossover-sweep --mode=point --n=10,100000
//!   crossover-sweep --mode=quick   (smoke test: 10^3..10^5, no files written)
//!
//! Engine options (all modes):
//!   --config=<file.json>          Load constants/tolerances from JSON
//!   --twin-prime=<C2>             Override the twin-prime constant
//!   --coefficients=a1,a2,a3,a4    Override the series coefficients
//!   --order=<0..4>                Series truncation order
//!   --form=additive|factored      Series expansion form
//!   --rel-tol=<x> --abs-tol=<x>   Quadrature tolerances
//!   --max-subdivisions=<N>        Quadrature budget
//!   --parity-epsilon=<pp>         Parity band in percentage points
//!   --progress-every=<N>          Progress log interval (0 = off)
//!   --max-sieve-bound=<N>         Largest sieve built; larger N are skipped

use std::collections::HashMap;
use std::path::Path;

use crossover_sweep::output::{print_summary, write_report};
use crossover_sweep::sweep::DEFAULT_MAX_SIEVE_BOUND;
use crossover_sweep::{run_sweep, SamplingPlan, SweepConfig};
use goldbach_core::{
    goldbach_count, singular_series_sieved, Engine, EngineConfig, EngineError, ExpansionForm,
    PrimalityTable,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_args(&args);

    let engine_config = match engine_config(&opts) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mode = opts.get("mode").map(|s| s.as_str()).unwrap_or("sweep");
    let result = match mode {
        "sweep" => run_sweep_mode(&opts, engine_config),
        "point" => run_point_mode(&opts, engine_config),
        "quick" => run_quick(engine_config),
        other => {
            eprintln!("Unknown mode: {other}. Use --mode=sweep|point|quick");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_sweep_mode(
    opts: &HashMap<String, String>,
    engine: EngineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let min_n = parse_u64(opts, "min-n", 1_000);
    let max_n = parse_u64(opts, "max-n", 100_000);
    let plan = match opts.get("plan").map(|s| s.as_str()).unwrap_or("stratified") {
        "stratified" => SamplingPlan::Stratified { min_n, max_n },
        "range" => SamplingPlan::Range {
            start: min_n,
            end: max_n,
            step: parse_u64(opts, "step", 1_000),
        },
        "random" => SamplingPlan::Random {
            min_n,
            max_n,
            per_decade: parse_usize(opts, "samples-per-decade", 50),
            seed: parse_u64(opts, "seed", 0x601d_bac4),
        },
        other => return Err(format!("unknown plan '{other}', use stratified|range|random").into()),
    };

    let config = SweepConfig {
        engine,
        parallel: opts.contains_key("parallel"),
        progress_every: parse_usize(opts, "progress-every", 100),
        max_sieve_bound: parse_u64(opts, "max-sieve-bound", DEFAULT_MAX_SIEVE_BOUND),
    };

    println!("Goldbach crossover sweep: N in [{}, {}]", min_n, max_n);
    println!("Plan: {:?}", plan);
    println!("Points: {}\n", plan.points().len());

    let report = run_sweep(&plan, &config)?;
    print_summary(&report);

    let output = opts
        .get("output")
        .cloned()
        .unwrap_or_else(|| "results/goldbach_data.csv".to_string());
    let json = opts
        .get("report")
        .cloned()
        .unwrap_or_else(|| "results/goldbach_report.json".to_string());
    write_report(&report, &output, Some(Path::new(&json)))?;
    println!("\nResults written to {} and {}", output, json);
    Ok(())
}

fn run_point_mode(
    opts: &HashMap<String, String>,
    config: EngineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let ns = parse_list_u64(opts, "n");
    let max_n = ns.iter().copied().max().ok_or("--mode=point needs --n=<N>[,<N>...]")?;
    let engine = Engine::new(config)?;
    let bound = max_n.min(parse_u64(opts, "max-sieve-bound", DEFAULT_MAX_SIEVE_BOUND));
    let table = PrimalityTable::new(bound);

    for n in ns {
        println!("N = {}", n);
        if let Err(e) = print_point(&engine, &table, n) {
            println!("  skipped: {}", e);
        }
        println!();
    }
    Ok(())
}

fn print_point(engine: &Engine, table: &PrimalityTable, n: u64) -> Result<(), EngineError> {
    let exact = goldbach_count(n, table)?;
    let s = singular_series_sieved(n, table)?;
    println!("  G(N) = {} ordered pairs", exact);
    println!("  S(N) = {:.6}", s);

    let integral = engine.integral().estimate_detailed_with_singular_series(n, s)?;
    println!(
        "  integral: {:.3} (quadrature error {:.2e}, {} subdivisions)",
        integral.prediction, integral.error_estimate, integral.subdivisions
    );

    let record = engine.evaluate(n, table)?;
    println!("  series:   {:.3}", record.series_prediction);
    if let (Some(sb), Some(ib)) = (record.series_bias_pct, record.integral_bias_pct) {
        println!("  bias: series {:+.3}%, integral {:+.3}%", sb, ib);
    }
    match record.advantage_ratio {
        Some(ratio) => println!("  winner: {} ({:.2}x)", record.winner, ratio),
        None => println!("  winner: {}", record.winner),
    }
    Ok(())
}

fn run_quick(engine: EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("QUICK mode: smoke test on the stratified grid up to 10^5");
    let plan = SamplingPlan::Stratified {
        min_n: 1_000,
        max_n: 100_000,
    };
    let config = SweepConfig {
        engine,
        progress_every: 0,
        ..SweepConfig::default()
    };
    let report = run_sweep(&plan, &config)?;
    print_summary(&report);
    Ok(())
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

fn parse_args(args: &[String]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for arg in args {
        if let Some(kv) = arg.strip_prefix("--") {
            if let Some((k, v)) = kv.split_once('=') {
                map.insert(k.to_string(), v.to_string());
            } else {
                map.insert(kv.to_string(), "true".to_string());
            }
        }
    }
    map
}

fn parse_u64(opts: &HashMap<String, String>, key: &str, default: u64) -> u64 {
    opts.get(key)
        .and_then(|v| {
            if let Some(hex) = v.strip_prefix("0x") {
                u64::from_str_radix(hex, 16).ok()
            } else {
                v.replace('_', "").parse().ok()
            }
        })
        .unwrap_or(default)
}

fn parse_usize(opts: &HashMap<String, String>, key: &str, default: usize) -> usize {
    opts.get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_list_u64(opts: &HashMap<String, String>, key: &str) -> Vec<u64> {
    opts.get(key)
        .map(|v| {
            v.split(',')
                .filter_map(|s| s.trim().replace('_', "").parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

fn parse_f64(opts: &HashMap<String, String>, key: &str) -> Result<Option<f64>, String> {
    opts.get(key)
        .map(|v| v.parse::<f64>().map_err(|_| format!("--{key}: '{v}' is not a number")))
        .transpose()
}

/// Config file first (if any), then individual flag overrides.
fn engine_config(opts: &HashMap<String, String>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match opts.get("config") {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    if let Some(c2) = parse_f64(opts, "twin-prime")? {
        config.constants.twin_prime = c2;
    }
    if let Some(list) = opts.get("coefficients") {
        let values: Vec<f64> = list
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| format!("--coefficients: '{list}' is not a list of numbers"))?;
        config.constants.coefficients = values
            .try_into()
            .map_err(|_| "--coefficients needs exactly four values".to_string())?;
    }
    if let Some(order) = opts.get("order") {
        config.series.order = order
            .parse()
            .map_err(|_| format!("--order: '{order}' is not an integer"))?;
    }
    if let Some(form) = opts.get("form") {
        config.series.form = match form.as_str() {
            "additive" => ExpansionForm::Additive,
            "factored" => ExpansionForm::Factored,
            other => return Err(format!("--form: unknown form '{other}'").into()),
        };
    }
    if let Some(rel) = parse_f64(opts, "rel-tol")? {
        config.quadrature.rel_tol = rel;
    }
    if let Some(abs) = parse_f64(opts, "abs-tol")? {
        config.quadrature.abs_tol = abs;
    }
    if let Some(max) = opts.get("max-subdivisions") {
        config.quadrature.max_subdivisions = max
            .parse()
            .map_err(|_| format!("--max-subdivisions: '{max}' is not an integer"))?;
    }
    if let Some(eps) = parse_f64(opts, "parity-epsilon")? {
        config.comparison.parity_epsilon_pct = eps;
    }

    config.validate()?;
    Ok(config)
}
