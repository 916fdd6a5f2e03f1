//! Same-day on-disk cache of per-symbol daily series.
//!
//! The cache is a single JSON file mapping symbol to its last fetched series.
//! Read and write failures are logged and otherwise ignored; a broken cache
//! only means refetching.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::OhlcBar;

const CACHE_FILE: &str = "series_cache.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CachedSeries {
    pub symbol: String,
    pub last_updated: NaiveDate,
    pub data: Vec<OhlcBar>,
}

pub struct SeriesCache {
    path: PathBuf,
}

impl SeriesCache {
    /// Cache under the platform cache directory, e.g.
    /// `~/.cache/ratioscope/series_cache.json`. Entries from previous days
    /// are pruned on open.
    pub fn open_default(today: NaiveDate) -> Option<Self> {
        let dir = dirs::cache_dir()?.join("ratioscope");
        if let Err(e) = fs::create_dir_all(&dir) {
            log::warn!("cannot create cache directory {}: {e}", dir.display());
            return None;
        }
        let cache = Self::open(&dir);
        cache.prune_stale(today);
        Some(cache)
    }

    pub fn open(dir: &Path) -> Self {
        Self {
            path: dir.join(CACHE_FILE),
        }
    }

    /// Returns the cached series for a symbol if it was fetched today.
    pub fn get_fresh(&self, symbol: &str, today: NaiveDate) -> Option<Vec<OhlcBar>> {
        let entry = self.load().remove(symbol)?;
        (entry.last_updated == today).then_some(entry.data)
    }

    /// Stores a series, replacing any previous entry for the same symbol.
    pub fn put(&self, series: CachedSeries) {
        let mut entries = self.load();
        entries.insert(series.symbol.clone(), series);
        self.store(&entries);
    }

    /// Drops every entry not fetched today.
    pub fn prune_stale(&self, today: NaiveDate) {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|_, entry| entry.last_updated == today);
        if entries.len() != before {
            self.store(&entries);
        }
    }

    fn load(&self) -> HashMap<String, CachedSeries> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return HashMap::new(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("ignoring unreadable cache {}: {e}", self.path.display());
                HashMap::new()
            }
        }
    }

    fn store(&self, entries: &HashMap<String, CachedSeries>) {
        let json = match serde_json::to_vec(entries) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("cannot serialize cache: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            log::warn!("cannot write cache {}: {e}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(symbol: &str, date: &str) -> CachedSeries {
        CachedSeries {
            symbol: symbol.to_string(),
            last_updated: date.parse().unwrap(),
            data: vec![OhlcBar {
                date: date.parse().unwrap(),
                open: 1.0,
                high: 2.0,
                low: 0.5,
                close: 1.5,
                volume: 100.0,
            }],
        }
    }

    #[test]
    fn round_trips_a_series() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::open(dir.path());
        let today: NaiveDate = "2024-06-01".parse().unwrap();

        cache.put(sample("GLD", "2024-06-01"));

        let data = cache.get_fresh("GLD", today).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].close, 1.5);
    }

    #[test]
    fn stale_entries_are_not_served() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::open(dir.path());
        let today: NaiveDate = "2024-06-02".parse().unwrap();

        cache.put(sample("GLD", "2024-06-01"));

        assert!(cache.get_fresh("GLD", today).is_none());
    }

    #[test]
    fn prune_removes_only_stale_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::open(dir.path());
        let today: NaiveDate = "2024-06-02".parse().unwrap();

        cache.put(sample("GLD", "2024-06-01"));
        cache.put(sample("SLV", "2024-06-02"));
        cache.prune_stale(today);

        assert!(cache.get_fresh("GLD", today).is_none());
        assert!(cache.get_fresh("SLV", today).is_some());
    }

    #[test]
    fn corrupt_cache_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CACHE_FILE), b"not json").unwrap();
        let cache = SeriesCache::open(dir.path());
        let today: NaiveDate = "2024-06-01".parse().unwrap();

        assert!(cache.get_fresh("GLD", today).is_none());

        // And writing afterwards recovers the file.
        cache.put(sample("GLD", "2024-06-01"));
        assert!(cache.get_fresh("GLD", today).is_some());
    }

    #[test]
    fn missing_symbol_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::open(dir.path());
        assert!(cache.get_fresh("GLD", "2024-06-01".parse().unwrap()).is_none());
    }
}
