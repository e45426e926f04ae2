//! CSV tables, the JSON report and a console summary.

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;

use goldbach_core::{ComparisonRecord, ScaleBandSummary};

use crate::error::SweepError;
use crate::sweep::SweepReport;

pub const RECORD_HEADER: &str = "N,G_N,series_prediction,integral_prediction,series_bias_pct,integral_bias_pct,winner,advantage_ratio";

pub const BAND_HEADER: &str = "band_lower,band_upper,count,undefined_count,mean_abs_series_bias_pct,mean_abs_integral_bias_pct,winner,advantage_ratio";

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// One CSV row per record; undefined fields are left empty.
pub fn records_csv(records: &[ComparisonRecord]) -> String {
    let mut out = String::from(RECORD_HEADER);
    out.push('\n');
    for r in records {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            r.n,
            r.exact,
            r.series_prediction,
            r.integral_prediction,
            opt(r.series_bias_pct),
            opt(r.integral_bias_pct),
            r.winner,
            opt(r.advantage_ratio)
        );
    }
    out
}

/// One CSV row per decade band.
pub fn bands_csv(bands: &[ScaleBandSummary]) -> String {
    let mut out = String::from(BAND_HEADER);
    out.push('\n');
    for b in bands {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            b.lower,
            b.upper,
            b.count,
            b.undefined_count,
            opt(b.mean_abs_series_bias_pct),
            opt(b.mean_abs_integral_bias_pct),
            b.winner,
            opt(b.advantage_ratio)
        );
    }
    out
}

fn create_parent(path: &Path) -> Result<(), SweepError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| SweepError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_text(path: impl AsRef<Path>, contents: &str) -> Result<(), SweepError> {
    let path = path.as_ref();
    create_parent(path)?;
    let mut file = fs::File::create(path).map_err(|source| SweepError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|source| SweepError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Pretty JSON of any serializable value.
pub fn write_json<T: serde::Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), SweepError> {
    let json = serde_json::to_string_pretty(value)?;
    write_text(path, &json)
}

/// Records CSV, bands CSV beside it (`<stem>_bands.csv`), and an optional JSON report.
pub fn write_report(
    report: &SweepReport,
    csv_path: impl AsRef<Path>,
    json_path: Option<&Path>,
) -> Result<(), SweepError> {
    let csv_path = csv_path.as_ref();
    write_text(csv_path, &records_csv(&report.records))?;

    let stem = csv_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sweep".to_string());
    let bands_path = csv_path.with_file_name(format!("{}_bands.csv", stem));
    write_text(&bands_path, &bands_csv(&report.bands))?;

    if let Some(json_path) = json_path {
        write_json(report, json_path)?;
    }
    Ok(())
}

fn fmt_pct(value: Option<f64>) -> String {
    value.map(|v| format!("{:.3}%", v)).unwrap_or_else(|| "-".to_string())
}

fn fmt_ratio(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}x", v)).unwrap_or_else(|| "-".to_string())
}

/// Console tables: bands, overall statistics, crossover and failures.
pub fn print_summary(report: &SweepReport) {
    println!("================================================================");
    println!("  GOLDBACH CROSSOVER: series vs logarithmic integral");
    println!("================================================================\n");
    println!(
        "  sieve bound {} ({} primes, {:.1}s), {} points evaluated in {:.1}s\n",
        report.sieve_bound,
        report.primes_sieved,
        report.sieve_secs,
        report.records.len() + report.failures.len(),
        report.evaluation_secs
    );

    println!(
        "  {:>22} {:>6} {:>12} {:>12} {:>9} {:>8}",
        "band", "count", "|series|", "|integral|", "winner", "ratio"
    );
    println!("  {}", "-".repeat(74));
    for b in &report.bands {
        println!(
            "  {:>22} {:>6} {:>12} {:>12} {:>9} {:>8}",
            format!("[{}, {})", b.lower, b.upper),
            b.count,
            fmt_pct(b.mean_abs_series_bias_pct),
            fmt_pct(b.mean_abs_integral_bias_pct),
            b.winner.to_string(),
            fmt_ratio(b.advantage_ratio)
        );
    }

    let s = &report.summary;
    println!();
    println!(
        "  wins: series {}, integral {}, parity {} ({} undefined)",
        s.series_wins,
        s.integral_wins,
        s.parities,
        s.records - s.defined
    );
    if let Some(stats) = &s.series {
        println!(
            "  series   |bias|: mean {:.3}%, median {:.3}%",
            stats.mean_abs_pct, stats.median_abs_pct
        );
    }
    if let Some(stats) = &s.integral {
        println!(
            "  integral |bias|: mean {:.3}%, median {:.3}%",
            stats.mean_abs_pct, stats.median_abs_pct
        );
    }
    match s.crossover_n {
        Some(n) => println!("  crossover: N ~ {}", n),
        None => println!("  crossover: not observed"),
    }
    if let Some(peak) = &s.peak_advantage {
        println!(
            "  peak integral advantage: {:.2}x at N = {}",
            peak.advantage_ratio, peak.n
        );
    }

    if !report.failures.is_empty() {
        println!("\n  skipped {} N:", report.failures.len());
        for f in &report.failures {
            println!("    N = {}: {}", f.n, f.message);
        }
    }
}
