//! Which even N a sweep evaluates.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use goldbach_core::comparison::decade_band;

/// Milestones always included by the stratified plan when in range.
pub const MILESTONES: [u64; 9] = [
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    54_950_000,
    70_000_000,
    97_000_000,
    100_000_000,
];

/// (start, end, step) strata: dense around the crossover near 10⁵,
/// sparse at the extremes.
const STRATA: [(u64, u64, u64); 5] = [
    (1_000, 10_000, 500),
    (10_000, 100_000, 1_000),
    (100_000, 1_000_000, 5_000),
    (1_000_000, 10_000_000, 50_000),
    (10_000_000, 100_000_000, 500_000),
];

/// A set of even N to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SamplingPlan {
    /// Log-stratified grid plus milestones, clipped to [min_n, max_n].
    Stratified { min_n: u64, max_n: u64 },
    /// Every even N in [start, end] stepping by `step`.
    Range { start: u64, end: u64, step: u64 },
    /// Seeded uniform even samples, `per_decade` per decade band.
    Random {
        min_n: u64,
        max_n: u64,
        per_decade: usize,
        seed: u64,
    },
    Explicit(Vec<u64>),
}

impl SamplingPlan {
    /// Sorted, deduplicated N of this plan.
    ///
    /// Generated plans only yield even N; odd or too-small explicit values
    /// are kept so the sweep can report them as failures.
    pub fn points(&self) -> Vec<u64> {
        let mut points = match self {
            SamplingPlan::Stratified { min_n, max_n } => stratified(*min_n, *max_n),
            SamplingPlan::Range { start, end, step } => {
                let first = start + start % 2;
                let step = (*step).max(2);
                let step = step + step % 2;
                (first..=*end).step_by(step as usize).collect()
            }
            SamplingPlan::Random {
                min_n,
                max_n,
                per_decade,
                seed,
            } => random(*min_n, *max_n, *per_decade, *seed),
            SamplingPlan::Explicit(ns) => ns.clone(),
        };
        points.sort_unstable();
        points.dedup();
        points
    }

    /// Largest N of the plan, the bound the sieve must be built to.
    pub fn max_n(&self) -> Option<u64> {
        self.points().last().copied()
    }
}

fn stratified(min_n: u64, max_n: u64) -> Vec<u64> {
    STRATA
        .iter()
        .flat_map(|&(start, end, step)| (start..end).step_by(step as usize))
        .chain(MILESTONES)
        .filter(|&n| n % 2 == 0 && n >= min_n && n <= max_n)
        .collect()
}

fn random(min_n: u64, max_n: u64, per_decade: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let low = min_n.max(4);
    let mut points = Vec::new();
    let mut lower = decade_band(low).0;

    while lower <= max_n {
        let (_, upper) = decade_band(lower);
        let lo = lower.max(low).div_ceil(2);
        let hi = upper.saturating_sub(1).min(max_n) / 2;
        if lo <= hi {
            for _ in 0..per_decade {
                points.push(2 * rng.gen_range(lo..=hi));
            }
        }
        if upper == u64::MAX {
            break;
        }
        lower = upper;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stratified_layout() {
        let points = SamplingPlan::Stratified {
            min_n: 1_000,
            max_n: 100_000,
        }
        .points();
        assert_eq!(points.first(), Some(&1_000));
        assert_eq!(points.last(), Some(&100_000));
        // 18 points of step 500 + 90 of step 1000 + the 10^5 milestone
        assert_eq!(points.len(), 18 + 90 + 1);
        assert!(points.windows(2).all(|w| w[0] < w[1]));
        assert!(points.iter().all(|n| n % 2 == 0));
    }

    #[test]
    fn test_stratified_full_range_includes_milestones() {
        let points = SamplingPlan::Stratified {
            min_n: 1_000,
            max_n: 100_000_000,
        }
        .points();
        for m in MILESTONES {
            assert!(points.binary_search(&m).is_ok(), "missing {}", m);
        }
        assert_eq!(points.last(), Some(&100_000_000));
    }

    #[test]
    fn test_range_forces_even() {
        let points = SamplingPlan::Range {
            start: 7,
            end: 20,
            step: 3,
        }
        .points();
        assert_eq!(points, vec![8, 12, 16, 20]);
    }

    #[test]
    fn test_random_is_seeded_and_in_range() {
        let plan = SamplingPlan::Random {
            min_n: 1_000,
            max_n: 999_999,
            per_decade: 20,
            seed: 7,
        };
        let a = plan.points();
        assert_eq!(a, plan.points());
        assert!(a.len() <= 60 && a.len() > 50);
        assert!(a.iter().all(|&n| n % 2 == 0 && (1_000..=999_999).contains(&n)));
        for lower in [1_000u64, 10_000, 100_000] {
            assert!(a.iter().any(|&n| n >= lower && n < lower * 10));
        }
    }

    #[test]
    fn test_explicit_sorted_and_deduplicated() {
        let plan = SamplingPlan::Explicit(vec![100, 10, 100, 7]);
        assert_eq!(plan.points(), vec![7, 10, 100]);
        assert_eq!(plan.max_n(), Some(100));
        assert_eq!(SamplingPlan::Explicit(vec![]).max_n(), None);
    }
}
