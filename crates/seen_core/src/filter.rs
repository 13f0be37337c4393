//! Fixed-size Bloom filter over byte/string keys.
//!
//! Capacity and seeds are fixed at construction; bits are only ever set.
//! False positives are possible, false negatives are not (except for the
//! empty key, which is never reported as a member).
//!
//! Mutation takes `&mut self`. Callers sharing one filter across threads wrap
//! it themselves (e.g. `Mutex<Filter>`).

use crate::config::FilterConfig;
use crate::consts::{DEFAULT_LOG2_BITS, DEFAULT_SEEDS, WORD_BITS};
use crate::errors::Result;
use crate::hash::SeedHasher;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Filter {
    m_bits: u64,
    words: Vec<u64>,
    hashers: Vec<SeedHasher>,
}

impl Filter {
    /// Reference filter: 2^25 bits, seeds 7, 11, 13, 31, 37, 61.
    pub fn new() -> Self {
        Self::build(DEFAULT_LOG2_BITS, &DEFAULT_SEEDS)
    }

    pub fn with_config(cfg: &FilterConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self::build(cfg.log2_bits, &cfg.seeds))
    }

    fn build(log2_bits: u32, seeds: &[u64]) -> Self {
        let m_bits = 1u64 << log2_bits;
        let n_words = (m_bits as usize).div_ceil(WORD_BITS);
        tracing::debug!(m_bits, k = seeds.len(), bytes = n_words * 8, "allocating filter");
        Self {
            m_bits,
            words: vec![0u64; n_words],
            hashers: seeds.iter().map(|&s| SeedHasher::new(s, log2_bits)).collect(),
        }
    }

    #[inline]
    fn indices<'a>(&'a self, key: &'a [u8]) -> impl Iterator<Item = u64> + 'a {
        self.hashers.iter().map(move |h| h.index(key))
    }

    #[inline]
    fn get(&self, bit: u64) -> bool {
        let (w, off) = (bit as usize / WORD_BITS, bit as usize % WORD_BITS);
        self.words[w] & (1u64 << off) != 0
    }

    pub fn add(&mut self, key: impl AsRef<[u8]>) {
        let key = key.as_ref();
        for h in &self.hashers {
            let bit = h.index(key) as usize;
            self.words[bit / WORD_BITS] |= 1u64 << (bit % WORD_BITS);
        }
    }

    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        let key = key.as_ref();
        if key.is_empty() {
            return false;
        }
        self.indices(key).all(|bit| self.get(bit))
    }

    /// Number of bits (`M`).
    pub fn capacity(&self) -> u64 { self.m_bits }

    /// Number of hash functions (`K`).
    pub fn hash_count(&self) -> usize { self.hashers.len() }

    pub fn seeds(&self) -> impl Iterator<Item = u64> + '_ {
        self.hashers.iter().map(SeedHasher::seed)
    }

    /// Count of set bits.
    pub fn ones(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Textbook false-positive estimate `(1 - e^(-k n / m))^k` after `n` inserts.
    pub fn estimated_fpp(&self, n: u64) -> f64 {
        let k = self.hashers.len() as f64;
        let m = self.m_bits as f64;
        (1.0 - (-k * n as f64 / m).exp()).powf(k)
    }
}

impl Default for Filter {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("capacity", &self.m_bits)
            .field("k", &self.hashers.len())
            .field("ones", &self.ones())
            .finish()
    }
}
