//! First-seen tracking on top of [`Filter`]: test, insert if new, count.
//!
//! `unique()` can only undercount: a false positive makes a new key look
//! already seen.

use crate::config::FilterConfig;
use crate::errors::Result;
use crate::filter::Filter;

#[derive(Debug, Default)]
pub struct UniqueTracker {
    filter: Filter,
    observed: u64,
    unique: u64,
}

impl UniqueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: &FilterConfig) -> Result<Self> {
        Ok(Self { filter: Filter::with_config(cfg)?, observed: 0, unique: 0 })
    }

    /// Returns `true` the first time `key` is (probably) seen. Empty keys are ignored.
    pub fn observe(&mut self, key: impl AsRef<[u8]>) -> bool {
        let key = key.as_ref();
        if key.is_empty() {
            tracing::trace!("ignoring empty key");
            return false;
        }
        self.observed += 1;
        if self.filter.contains(key) {
            return false;
        }
        self.filter.add(key);
        self.unique += 1;
        true
    }

    pub fn observed(&self) -> u64 { self.observed }
    pub fn unique(&self) -> u64 { self.unique }
    pub fn filter(&self) -> &Filter { &self.filter }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_key_once() {
        let mut t = UniqueTracker::new();
        assert!(t.observe("10.0.0.1"));
        assert!(t.observe("10.0.0.2"));
        assert!(!t.observe("10.0.0.1"));
        assert!(!t.observe("10.0.0.2"));
        assert_eq!(t.observed(), 4);
        assert_eq!(t.unique(), 2);
        assert!(t.filter().contains("10.0.0.1"));
    }

    #[test]
    fn empty_key_is_not_counted() {
        let mut t = UniqueTracker::new();
        assert!(!t.observe(""));
        assert!(!t.observe(b""));
        assert_eq!(t.observed(), 0);
        assert_eq!(t.unique(), 0);
        assert_eq!(t.filter().ones(), 0);
    }

    #[test]
    fn with_config_rejects_invalid() {
        let cfg = FilterConfig { seeds: vec![], ..FilterConfig::default() };
        assert!(UniqueTracker::with_config(&cfg).is_err());
    }
}
