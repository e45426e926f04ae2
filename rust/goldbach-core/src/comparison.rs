//! Per-N bias comparison and decade-band aggregation.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::config::ComparisonConfig;
use crate::error::{Component, EngineError};

/// Which predictor tracks G(N) more closely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Series,
    Integral,
    /// |bias| values closer than the parity epsilon.
    Parity,
    /// G(N) = 0, so bias is undefined.
    Undefined,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Series => write!(f, "series"),
            Winner::Integral => write!(f, "integral"),
            Winner::Parity => write!(f, "parity"),
            Winner::Undefined => write!(f, "undefined"),
        }
    }
}

/// Outcome of comparing both predictions against one exact count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRecord {
    pub n: u64,
    pub exact: u64,
    pub series_prediction: f64,
    pub integral_prediction: f64,
    /// (prediction − G) / G × 100; `None` when G = 0.
    pub series_bias_pct: Option<f64>,
    pub integral_bias_pct: Option<f64>,
    pub winner: Winner,
    /// Larger |bias| over smaller |bias|, always >= 1; `None` when G = 0.
    pub advantage_ratio: Option<f64>,
}

impl ComparisonRecord {
    /// The division condition behind an undefined record.
    pub fn degenerate(&self) -> Option<EngineError> {
        if self.winner == Winner::Undefined {
            Some(EngineError::DivisionDegenerate {
                component: Component::Comparison,
                n: self.n,
            })
        } else {
            None
        }
    }

    pub fn is_defined(&self) -> bool {
        self.winner != Winner::Undefined
    }
}

/// Signed bias of `prediction` relative to `exact`, in percent.
pub fn bias_pct(prediction: f64, exact: u64, n: u64) -> Result<f64, EngineError> {
    if exact == 0 {
        return Err(EngineError::DivisionDegenerate {
            component: Component::Comparison,
            n,
        });
    }
    let g = exact as f64;
    Ok((prediction - g) / g * 100.0)
}

/// Pick the winner between two absolute errors and the ratio favouring it.
///
/// The ratio is larger/smaller, so it is never below 1. It is infinite only
/// when the winner is exact and the loser is not.
pub fn classify(abs_series: f64, abs_integral: f64, parity_epsilon: f64) -> (Winner, f64) {
    let (small, large) = if abs_series <= abs_integral {
        (abs_series, abs_integral)
    } else {
        (abs_integral, abs_series)
    };
    let ratio = if large == small {
        1.0
    } else if small == 0.0 {
        f64::INFINITY
    } else {
        large / small
    };

    if (abs_series - abs_integral).abs() < parity_epsilon {
        return (Winner::Parity, ratio);
    }
    let winner = if abs_series < abs_integral {
        Winner::Series
    } else {
        Winner::Integral
    };
    (winner, ratio)
}

/// Compare both predictions for one N.
///
/// G(N) = 0 yields a record tagged `Winner::Undefined` instead of an error.
pub fn compare(
    n: u64,
    exact: u64,
    series_prediction: f64,
    integral_prediction: f64,
    config: &ComparisonConfig,
) -> ComparisonRecord {
    let (series_bias, integral_bias) = match (
        bias_pct(series_prediction, exact, n),
        bias_pct(integral_prediction, exact, n),
    ) {
        (Ok(s), Ok(i)) => (s, i),
        _ => {
            return ComparisonRecord {
                n,
                exact,
                series_prediction,
                integral_prediction,
                series_bias_pct: None,
                integral_bias_pct: None,
                winner: Winner::Undefined,
                advantage_ratio: None,
            }
        }
    };

    let (winner, ratio) = classify(series_bias.abs(), integral_bias.abs(), config.parity_epsilon_pct);
    ComparisonRecord {
        n,
        exact,
        series_prediction,
        integral_prediction,
        series_bias_pct: Some(series_bias),
        integral_bias_pct: Some(integral_bias),
        winner,
        advantage_ratio: Some(ratio),
    }
}

// ---------------------------------------------------------------------------
// Decade bands
// ---------------------------------------------------------------------------

/// Aggregate over the records whose N lies in [lower, upper).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleBandSummary {
    pub lower: u64,
    pub upper: u64,
    /// Records in the band, defined or not.
    pub count: usize,
    pub undefined_count: usize,
    /// `None` when the band holds no defined record.
    pub mean_abs_series_bias_pct: Option<f64>,
    pub mean_abs_integral_bias_pct: Option<f64>,
    pub winner: Winner,
    pub advantage_ratio: Option<f64>,
}

/// The decade [10^k, 10^(k+1)) holding `n`, as (lower, upper).
pub fn decade_band(n: u64) -> (u64, u64) {
    let mut lower = 1u64;
    while let Some(next) = lower.checked_mul(10) {
        if next > n {
            return (lower, next);
        }
        lower = next;
    }
    (lower, u64::MAX)
}

/// Group records by decade band, ascending.
pub fn aggregate_bands(records: &[ComparisonRecord], config: &ComparisonConfig) -> Vec<ScaleBandSummary> {
    let mut sorted: Vec<&ComparisonRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.n);

    let mut bands = Vec::new();
    let mut start = 0;
    while start < sorted.len() {
        let (lower, upper) = decade_band(sorted[start].n);
        let end = start + sorted[start..].iter().take_while(|r| r.n < upper).count();
        bands.push(summarize_band(lower, upper, &sorted[start..end], config));
        start = end;
    }
    bands
}

fn summarize_band(
    lower: u64,
    upper: u64,
    records: &[&ComparisonRecord],
    config: &ComparisonConfig,
) -> ScaleBandSummary {
    let defined: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|r| Some((r.series_bias_pct?.abs(), r.integral_bias_pct?.abs())))
        .collect();
    let undefined_count = records.len() - defined.len();

    if defined.is_empty() {
        return ScaleBandSummary {
            lower,
            upper,
            count: records.len(),
            undefined_count,
            mean_abs_series_bias_pct: None,
            mean_abs_integral_bias_pct: None,
            winner: Winner::Undefined,
            advantage_ratio: None,
        };
    }

    let k = defined.len() as f64;
    let mean_series = defined.iter().map(|(s, _)| s).sum::<f64>() / k;
    let mean_integral = defined.iter().map(|(_, i)| i).sum::<f64>() / k;
    let (winner, ratio) = classify(mean_series, mean_integral, config.parity_epsilon_pct);

    ScaleBandSummary {
        lower,
        upper,
        count: records.len(),
        undefined_count,
        mean_abs_series_bias_pct: Some(mean_series),
        mean_abs_integral_bias_pct: Some(mean_integral),
        winner,
        advantage_ratio: Some(ratio),
    }
}

// ---------------------------------------------------------------------------
// Sweep-wide summary
// ---------------------------------------------------------------------------

/// Mean and median |bias| of one predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiasStats {
    pub mean_abs_pct: f64,
    pub median_abs_pct: f64,
}

impl BiasStats {
    fn from_abs(values: &mut [f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            values[n / 2]
        } else {
            0.5 * (values[n / 2 - 1] + values[n / 2])
        };
        Some(BiasStats {
            mean_abs_pct: mean,
            median_abs_pct: median,
        })
    }
}

/// The record where the integral is furthest ahead of the series.
///
/// The ratio is |series bias| / |integral bias|, taken over every defined
/// record, so it drops below 1 when the series wins everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakAdvantage {
    pub n: u64,
    pub advantage_ratio: f64,
}

/// Whole-sweep statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepSummary {
    pub records: usize,
    pub defined: usize,
    pub series_wins: usize,
    pub integral_wins: usize,
    pub parities: usize,
    pub series: Option<BiasStats>,
    pub integral: Option<BiasStats>,
    /// First N, ascending, where the integral wins, provided the series wins
    /// somewhere in the sweep.
    pub crossover_n: Option<u64>,
    pub peak_advantage: Option<PeakAdvantage>,
}

/// |series| / |integral|; both exact counts as a tie.
fn integral_advantage(abs_series: f64, abs_integral: f64) -> f64 {
    if abs_integral == 0.0 {
        if abs_series == 0.0 {
            1.0
        } else {
            f64::INFINITY
        }
    } else {
        abs_series / abs_integral
    }
}

/// Overall statistics, crossover and peak advantage across all records.
pub fn summarize(records: &[ComparisonRecord]) -> SweepSummary {
    let mut sorted: Vec<&ComparisonRecord> = records.iter().filter(|r| r.is_defined()).collect();
    sorted.sort_by_key(|r| r.n);

    let mut series_abs: Vec<f64> = sorted.iter().filter_map(|r| r.series_bias_pct).map(f64::abs).collect();
    let mut integral_abs: Vec<f64> = sorted.iter().filter_map(|r| r.integral_bias_pct).map(f64::abs).collect();

    let count = |w: Winner| sorted.iter().filter(|r| r.winner == w).count();

    let crossover_n = if sorted.iter().any(|r| r.winner == Winner::Series) {
        sorted.iter().find(|r| r.winner == Winner::Integral).map(|r| r.n)
    } else {
        None
    };

    let peak_advantage = sorted
        .iter()
        .filter_map(|r| {
            let s = r.series_bias_pct?.abs();
            let i = r.integral_bias_pct?.abs();
            Some((r.n, integral_advantage(s, i)))
        })
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|(n, ratio)| PeakAdvantage {
            n,
            advantage_ratio: ratio,
        });

    SweepSummary {
        records: records.len(),
        defined: sorted.len(),
        series_wins: count(Winner::Series),
        integral_wins: count(Winner::Integral),
        parities: count(Winner::Parity),
        series: BiasStats::from_abs(&mut series_abs),
        integral: BiasStats::from_abs(&mut integral_abs),
        crossover_n,
        peak_advantage,
    }
}
