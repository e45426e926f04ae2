//! Cross-checks between independent routes to the same quantity.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use goldbach_core::counter::count_batch;
use goldbach_core::singular::{odd_prime_divisors, odd_prime_divisors_sieved};
use goldbach_core::{
    goldbach_count, goldbach_pairs, singular_series, singular_series_sieved, Engine, EngineConfig,
    IntegralEstimator, PrimalityTable, SeriesEstimator,
};

/// Brute-force G(N) with a naive primality test.
fn naive_count(n: u64) -> u64 {
    fn is_prime(k: u64) -> bool {
        k >= 2 && (2..).take_while(|d| d * d <= k).all(|d| k % d != 0)
    }
    (2..=n - 2).filter(|&p| is_prime(p) && is_prime(n - p)).count() as u64
}

#[test]
fn test_count_matches_naive() {
    let table = PrimalityTable::new(2_000);
    for n in (4..=2_000).step_by(2) {
        assert_eq!(goldbach_count(n, &table).unwrap(), naive_count(n), "N = {}", n);
    }
}

#[test]
fn test_batch_pairs_and_single_counts_agree() {
    let table = PrimalityTable::new(50_000);
    let ns: Vec<u64> = (1..=50).map(|k| k * 1_000).collect();
    let batch = count_batch(&ns, &table);
    for (n, batched) in ns.iter().zip(batch) {
        let single = goldbach_count(*n, &table).unwrap();
        assert_eq!(batched.unwrap(), single);
        assert_eq!(goldbach_pairs(*n, &table).unwrap().len() as u64, single);
    }
}

#[test]
fn test_sieved_and_trial_singular_series_agree() {
    // Table deliberately smaller than most N so the odd-candidate tail is exercised.
    let table = PrimalityTable::new(1_000);
    let mut rng = StdRng::seed_from_u64(12345);
    for _ in 0..500 {
        let n = 2 * rng.gen_range(2u64..50_000_000);
        assert_eq!(
            odd_prime_divisors(n),
            odd_prime_divisors_sieved(n, &table),
            "N = {}",
            n
        );
        assert_eq!(singular_series(n).unwrap(), singular_series_sieved(n, &table).unwrap());
    }
}

#[test]
fn test_engine_matches_components() {
    let table = PrimalityTable::new(100_000);
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let series = SeriesEstimator::default();
    let integral = IntegralEstimator::default();

    for n in [1_000u64, 4_096, 30_030, 99_998, 100_000] {
        let record = engine.evaluate(n, &table).unwrap();
        assert_eq!(record.exact, goldbach_count(n, &table).unwrap());
        assert_eq!(record.series_prediction, series.estimate(n).unwrap());
        assert_eq!(record.integral_prediction, integral.estimate(n).unwrap());
    }
}
