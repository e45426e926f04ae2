//! Singular series S(N) of the Hardy-Littlewood Goldbach formula.
//!
//! S(N) = ∏ (1 − 1/(p−1)²) / (1 − 2/(p−1)²) over the distinct odd primes p | N.
//!
//! The p = 2 correction lives in the twin-prime constant, so it never enters
//! the product and S(2ᵏ) = 1.

use crate::error::{require_even_n, Component, EngineError};
use crate::sieve::PrimalityTable;

/// Multiplicative factor contributed by one odd prime divisor p.
pub fn local_factor(p: u64) -> f64 {
    // Square in f64: (p - 1)² overflows u64 once p > 2³².
    let d = (p - 1) as f64;
    let d = d * d;
    (1.0 - 1.0 / d) / (1.0 - 2.0 / d)
}

/// Distinct odd prime divisors of `n`, ascending, by trial division.
pub fn odd_prime_divisors(n: u64) -> Vec<u64> {
    let mut divisors = Vec::new();
    let mut remaining = strip_twos(n);

    let mut divisor = 3u64;
    while divisor * divisor <= remaining {
        divide_out(divisor, &mut remaining, &mut divisors);
        divisor += 2;
    }

    if remaining > 1 {
        divisors.push(remaining);
    }
    divisors
}

/// Distinct odd prime divisors of `n`, trial dividing by sieved primes.
///
/// Continues with odd candidates past the table when it ends below √n.
pub fn odd_prime_divisors_sieved(n: u64, table: &PrimalityTable) -> Vec<u64> {
    let mut divisors = Vec::new();
    let mut remaining = strip_twos(n);

    for p in table.primes().skip_while(|&p| p == 2) {
        if p * p > remaining {
            break;
        }
        divide_out(p, &mut remaining, &mut divisors);
    }

    let mut divisor = (table.bound() + 1).max(3) | 1;
    while divisor * divisor <= remaining {
        divide_out(divisor, &mut remaining, &mut divisors);
        divisor += 2;
    }

    if remaining > 1 {
        divisors.push(remaining);
    }
    divisors
}

fn divide_out(divisor: u64, remaining: &mut u64, divisors: &mut Vec<u64>) {
    if *remaining % divisor == 0 {
        divisors.push(divisor);
        while *remaining % divisor == 0 {
            *remaining /= divisor;
        }
    }
}

fn strip_twos(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    n >> n.trailing_zeros()
}

fn product(divisors: &[u64]) -> f64 {
    divisors.iter().map(|&p| local_factor(p)).product()
}

/// S(N) for even N >= 4.
pub fn singular_series(n: u64) -> Result<f64, EngineError> {
    require_even_n(n, Component::SingularSeries)?;
    Ok(product(&odd_prime_divisors(n)))
}

/// S(N) for even N >= 4, factoring with a prebuilt primality table.
pub fn singular_series_sieved(n: u64, table: &PrimalityTable) -> Result<f64, EngineError> {
    require_even_n(n, Component::SingularSeries)?;
    Ok(product(&odd_prime_divisors_sieved(n, table)))
}
