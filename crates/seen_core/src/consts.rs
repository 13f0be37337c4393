// crates/seen_core/src/consts.rs

/// Bit count of the reference filter is `1 << DEFAULT_LOG2_BITS` (32 Mi bits, 4 MiB).
pub const DEFAULT_LOG2_BITS: u32 = 25;

/// Reference seeds, one hash function per entry.
pub const DEFAULT_SEEDS: [u64; 6] = [7, 11, 13, 31, 37, 61];

pub const MIN_LOG2_BITS: u32 = 3;  // one byte
pub const MAX_LOG2_BITS: u32 = 32; // 512 MiB; also capped by usize width at validation

pub const WORD_BITS: usize = u64::BITS as usize;

const _: () = { assert!(DEFAULT_LOG2_BITS >= MIN_LOG2_BITS && DEFAULT_LOG2_BITS <= MAX_LOG2_BITS); };
