use crate::consts::{DEFAULT_LOG2_BITS, DEFAULT_SEEDS, MAX_LOG2_BITS, MIN_LOG2_BITS};
use crate::errors::{Result, SeenError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Bit index must fit `usize`, so 32-bit targets stop at `usize::BITS - 1`.
fn max_log2_bits() -> u32 {
    MAX_LOG2_BITS.min(usize::BITS - 1)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Filter shape. Missing fields in a JSON file fall back to the reference values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// The filter holds `1 << log2_bits` bits.
    pub log2_bits: u32,
    pub seeds: Vec<u64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            log2_bits: DEFAULT_LOG2_BITS,
            seeds: DEFAULT_SEEDS.to_vec(),
        }
    }
}

impl FilterConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let cfg: FilterConfig = serde_json::from_str(&s)?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), log2_bits = cfg.log2_bits, k = cfg.seeds.len(), "loaded filter config");
        Ok(cfg)
    }

    /// Writes `<path>.tmp` and renames it over `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp = tmp_path(path);
        let mut f = fs::File::create(&tmp)?;
        f.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        f.sync_all()?;
        drop(f);
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let max = max_log2_bits();
        if !(MIN_LOG2_BITS..=max).contains(&self.log2_bits) {
            return Err(SeenError::CapacityOutOfRange {
                got: self.log2_bits,
                min: MIN_LOG2_BITS,
                max,
            });
        }
        if self.seeds.is_empty() {
            return Err(SeenError::NoSeeds);
        }
        let mut seen = HashSet::with_capacity(self.seeds.len());
        for &s in &self.seeds {
            if !seen.insert(s) {
                return Err(SeenError::DuplicateSeed(s));
            }
        }
        Ok(())
    }

    pub fn capacity(&self) -> u64 { 1u64 << self.log2_bits }
}
