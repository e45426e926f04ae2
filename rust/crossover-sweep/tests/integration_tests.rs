//! End-to-end sweeps: plan → sieve → evaluate → CSV/JSON on disk.

use crossover_sweep::output::{write_report, BAND_HEADER, RECORD_HEADER};
use crossover_sweep::{run_sweep, SamplingPlan, SweepConfig};
use goldbach_core::{EngineConfig, ExpansionForm, Winner};

fn small_plan() -> SamplingPlan {
    SamplingPlan::Stratified {
        min_n: 1_000,
        max_n: 20_000,
    }
}

#[test]
fn test_stratified_sweep_bands() {
    let report = run_sweep(&small_plan(), &SweepConfig::default()).unwrap();

    // 18 points below 10^4, 11 in [10^4, 2·10^4]
    assert_eq!(report.records.len(), 29);
    assert!(report.failures.is_empty());
    assert_eq!(report.sieve_bound, 20_000);
    assert_eq!(report.primes_sieved, 2_262);

    let bounds: Vec<(u64, u64)> = report.bands.iter().map(|b| (b.lower, b.upper)).collect();
    assert_eq!(bounds, vec![(1_000, 10_000), (10_000, 100_000)]);
    assert_eq!(report.bands[0].count, 18);
    assert_eq!(report.bands[1].count, 11);

    let s = &report.summary;
    assert_eq!(s.records, 29);
    assert_eq!(s.defined, 29);
    assert_eq!(s.series_wins + s.integral_wins + s.parities, 29);
}

#[test]
fn test_known_milestone_in_sweep() {
    let report = run_sweep(&SamplingPlan::Explicit(vec![100_000]), &SweepConfig::default()).unwrap();
    let r = &report.records[0];
    assert_eq!(r.exact, 1_620);
    assert!((r.series_bias_pct.unwrap() + 21.62).abs() < 0.01);
    assert!((r.integral_bias_pct.unwrap() + 19.61).abs() < 0.01);
    assert_eq!(r.winner, Winner::Integral);
}

#[test]
fn test_write_report_files() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("out").join("goldbach_data.csv");
    let json = dir.path().join("out").join("goldbach_report.json");

    let report = run_sweep(&small_plan(), &SweepConfig::default()).unwrap();
    write_report(&report, &csv, Some(json.as_path())).unwrap();

    let records = std::fs::read_to_string(&csv).unwrap();
    let mut lines = records.lines();
    assert_eq!(lines.next(), Some(RECORD_HEADER));
    assert_eq!(lines.count(), 29);

    let bands = std::fs::read_to_string(dir.path().join("out").join("goldbach_data_bands.csv")).unwrap();
    assert_eq!(bands.lines().next(), Some(BAND_HEADER));
    assert_eq!(bands.lines().count(), 3);

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["records"].as_array().unwrap().len(), 29);
    assert_eq!(value["bands"].as_array().unwrap().len(), 2);
    assert_eq!(value["summary"]["records"], 29);
    assert_eq!(value["plan"]["Stratified"]["max_n"], 20_000);
    assert_eq!(value["config"]["series"]["order"], 4);
}

#[test]
fn test_failures_recorded_in_report() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("mixed.csv");
    let json = dir.path().join("mixed.json");

    let plan = SamplingPlan::Explicit(vec![5, 6, 100]);
    let report = run_sweep(&plan, &SweepConfig::default()).unwrap();
    write_report(&report, &csv, Some(json.as_path())).unwrap();

    assert_eq!(report.records.len(), 1);
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    let failures = value["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0]["n"], 5);
    assert_eq!(failures[1]["n"], 6);
}

#[test]
fn test_config_file_drives_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.json");
    std::fs::write(&path, r#"{ "series": { "order": 4, "form": "factored" } }"#).unwrap();

    let engine = EngineConfig::from_json_file(&path).unwrap();
    assert_eq!(engine.series.form, ExpansionForm::Factored);

    let config = SweepConfig {
        engine,
        ..SweepConfig::default()
    };
    let factored = run_sweep(&SamplingPlan::Explicit(vec![10_000]), &config).unwrap();
    let additive = run_sweep(&SamplingPlan::Explicit(vec![10_000]), &SweepConfig::default()).unwrap();

    assert_eq!(factored.records[0].exact, additive.records[0].exact);
    assert_eq!(
        factored.records[0].integral_prediction,
        additive.records[0].integral_prediction
    );
    assert_ne!(
        factored.records[0].series_prediction,
        additive.records[0].series_prediction
    );
}
