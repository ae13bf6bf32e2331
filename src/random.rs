//! Short random identifiers for temp names and task suffixes.
//!
//! Not suitable for secrets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lowercase alphanumerics.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generator handle, seeded once and reused for every identifier.
pub struct IdGenerator {
    rng: StdRng,
}

impl IdGenerator {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce `len` characters drawn uniformly from the alphabet.
    pub fn generate(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_has_36_distinct_symbols() {
        let mut symbols = ALPHABET.to_vec();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 36);
    }

    #[test]
    fn test_generate_length_and_alphabet() {
        let mut gen = IdGenerator::new();
        for len in [0, 1, 8, 64] {
            let id = gen.generate(len);
            assert_eq!(id.len(), len);
            assert!(id.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let a = IdGenerator::with_seed(42).generate(16);
        let b = IdGenerator::with_seed(42).generate(16);
        assert_eq!(a, b);
    }
}
