//! Seeded multiplicative string hash used to pick filter bits.
//!
//! `r = r * seed + byte` over the input with wrapping `u64` arithmetic, then
//! masked down to the filter capacity. Fast and non-cryptographic; it only
//! has to spread benign keys, not resist crafted ones.

/// Raw accumulator before masking.
#[inline]
pub fn seeded_hash(seed: u64, key: &[u8]) -> u64 {
    key.iter()
        .fold(0u64, |r, &b| r.wrapping_mul(seed).wrapping_add(b as u64))
}

/// One hash function of a filter: a seed plus the shared capacity mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedHasher {
    seed: u64,
    mask: u64,
}

impl SeedHasher {
    /// Indices land in `0..2^log2_bits`; `log2_bits >= 64` keeps the whole accumulator.
    pub fn new(seed: u64, log2_bits: u32) -> Self {
        let mask = 1u64.checked_shl(log2_bits).map_or(u64::MAX, |cap| cap - 1);
        Self { seed, mask }
    }

    pub fn seed(&self) -> u64 { self.seed }

    #[inline]
    pub fn index(&self, key: &[u8]) -> u64 {
        seeded_hash(self.seed, key) & self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: u32 = 25;

    #[test]
    fn pinned_reference_indices() {
        let h = SeedHasher::new(7, M);
        assert_eq!(h.index(b"test"), 45658);
        assert_eq!(h.index(b"bob"), 5677);

        let all: Vec<u64> = [7u64, 11, 13, 31, 37, 61]
            .iter()
            .map(|&s| SeedHasher::new(s, M).index(b"test"))
            .collect();
        assert_eq!(all, vec![45658, 167998, 273532, 3556498, 6018388, 26712748]);
    }

    #[test]
    fn long_input_wraps_instead_of_panicking() {
        let key = b"the quick brown fox jumps over the lazy dog";
        let all: Vec<u64> = [7u64, 11, 13, 31, 37, 61]
            .iter()
            .map(|&s| SeedHasher::new(s, M).index(key))
            .collect();
        assert_eq!(all, vec![13612827, 7616783, 1773301, 31110515, 29122509, 13673765]);

        let huge = vec![0xffu8; 1 << 16];
        assert!(SeedHasher::new(61, M).index(&huge) < 1 << M);
    }

    #[test]
    fn small_capacity_masks_low_bits() {
        assert_eq!(SeedHasher::new(7, 10).index(b"test"), 602);
        assert_eq!(seeded_hash(7, b"test") & 1023, 602);
    }

    #[test]
    fn mask_is_defined_for_every_width() {
        assert_eq!(SeedHasher::new(7, 0).index(b"test"), 0);
        assert_eq!(SeedHasher::new(7, 64).index(b"test"), seeded_hash(7, b"test"));
        assert_eq!(SeedHasher::new(7, 200).index(b"test"), 45658);
        let key = b"the quick brown fox jumps over the lazy dog";
        assert_eq!(SeedHasher::new(61, 63).index(key), seeded_hash(61, key) & (u64::MAX >> 1));
    }

    #[test]
    fn empty_input_hashes_to_zero() {
        assert_eq!(seeded_hash(13, b""), 0);
        assert_eq!(SeedHasher::new(13, M).index(b""), 0);
    }

    #[test]
    fn deterministic() {
        let h = SeedHasher::new(31, M);
        assert_eq!(h.index(b"127.0.0.1"), h.index(b"127.0.0.1"));
        assert_eq!(h.index(b"127.0.0.1"), 29603197);
    }
}
