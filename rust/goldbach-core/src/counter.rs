//! Exact Goldbach partition counts G(N).
//!
//! Counting is **ordered**: (p, q) and (q, p) are two partitions unless
//! p = q. So G(10) = 3 from (3, 7), (5, 5), (7, 3), and G(4) = 1 from (2, 2).
//! This is the convention the Hardy-Littlewood leading term 2·C₂·S(N)
//! predicts; halving it gives the unordered count.

use crate::error::{require_even_n, Component, EngineError};
use crate::sieve::PrimalityTable;

fn require_coverage(n: u64, table: &PrimalityTable) -> Result<(), EngineError> {
    let required = n - 2;
    if !table.covers(required) {
        return Err(EngineError::TableTooSmall {
            component: Component::ExactCounter,
            n,
            bound: table.bound(),
            required,
        });
    }
    Ok(())
}

/// G(N): ordered pairs (p, N − p) with 2 <= p <= N − 2, both prime.
///
/// `table` must cover N − 2; build it once for the largest N of a batch.
pub fn goldbach_count(n: u64, table: &PrimalityTable) -> Result<u64, EngineError> {
    require_even_n(n, Component::ExactCounter)?;
    require_coverage(n, table)?;

    let count = (2..=n - 2)
        .filter(|&p| table.is_prime(p) && table.is_prime(n - p))
        .count() as u64;
    Ok(count)
}

/// The ordered pairs counted by [`goldbach_count`], ascending in p.
pub fn goldbach_pairs(n: u64, table: &PrimalityTable) -> Result<Vec<(u64, u64)>, EngineError> {
    require_even_n(n, Component::ExactCounter)?;
    require_coverage(n, table)?;

    Ok(table
        .primes()
        .take_while(|&p| p <= n - 2)
        .filter(|&p| table.is_prime(n - p))
        .map(|p| (p, n - p))
        .collect())
}

/// G(N) for each N, against one shared table.
pub fn count_batch(ns: &[u64], table: &PrimalityTable) -> Vec<Result<u64, EngineError>> {
    ns.iter().map(|&n| goldbach_count(n, table)).collect()
}
