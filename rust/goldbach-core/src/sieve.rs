//! Sieve of Eratosthenes primality table.
//!
//! Built once per batch for the largest N the batch needs and shared by
//! reference afterwards; nothing mutates it after construction.

/// Boolean primality table over `0..=bound`.
#[derive(Debug, Clone)]
pub struct PrimalityTable {
    is_prime: Vec<bool>,
}

impl PrimalityTable {
    /// Sieve every integer up to and including `bound`.
    ///
    /// A bound below 2 gives a table with no primes.
    pub fn new(bound: u64) -> Self {
        if bound < 2 {
            return Self {
                is_prime: vec![false; bound as usize + 1],
            };
        }

        let size = (bound + 1) as usize;
        let mut is_prime = vec![true; size];
        is_prime[0] = false;
        is_prime[1] = false;
        let mut i = 2usize;
        while i * i < size {
            if is_prime[i] {
                let mut j = i * i;
                while j < size {
                    is_prime[j] = false;
                    j += i;
                }
            }
            i += 1;
        }

        let table = Self { is_prime };
        log::debug!(
            "sieved {} primes up to {}",
            table.prime_count(),
            table.bound()
        );
        table
    }

    /// Largest integer the table answers for.
    pub fn bound(&self) -> u64 {
        (self.is_prime.len() - 1) as u64
    }

    /// Whether `k` lies inside the table.
    pub fn covers(&self, k: u64) -> bool {
        k <= self.bound()
    }

    /// Primality of `k`. Integers beyond the bound read as not prime, so
    /// callers that need exact answers check `covers` first.
    #[inline]
    pub fn is_prime(&self, k: u64) -> bool {
        self.is_prime.get(k as usize).copied().unwrap_or(false)
    }

    /// Ascending iterator over the primes in the table.
    pub fn primes(&self) -> impl Iterator<Item = u64> + '_ {
        self.is_prime
            .iter()
            .enumerate()
            .filter(|(_, &p)| p)
            .map(|(i, _)| i as u64)
    }

    /// π(bound).
    pub fn prime_count(&self) -> usize {
        self.is_prime.iter().filter(|&&p| p).count()
    }
}
