//! File cache for fetched HTML with per-category TTL.
//!
//! Stores raw page bodies so a re-run does not refetch the few thousand
//! report pages behind one dataset. Expiry is judged from file mtime.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::debug;

/// Cache categories with different TTLs
#[derive(Debug, Clone, Copy)]
pub enum CacheCategory {
    /// Scouting-report pages; percentiles move slowly. 7 days.
    ScoutReport,
    /// League index; squads and minutes change weekly. 24 hours.
    LeagueIndex,
}

impl CacheCategory {
    pub fn ttl(&self) -> Duration {
        match self {
            CacheCategory::ScoutReport => Duration::from_secs(7 * 24 * 3600),
            CacheCategory::LeagueIndex => Duration::from_secs(24 * 3600),
        }
    }

    fn dir_name(&self) -> &str {
        match self {
            CacheCategory::ScoutReport => "reports",
            CacheCategory::LeagueIndex => "index",
        }
    }
}

/// File-based HTML cache
pub struct Cache {
    base_dir: PathBuf,
}

impl Cache {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn cache_path(&self, category: CacheCategory, key: &str) -> PathBuf {
        self.base_dir
            .join(category.dir_name())
            .join(format!("{}.html", key))
    }

    /// Get a cached body if present and not expired
    pub fn get(&self, category: CacheCategory, key: &str) -> Option<String> {
        let path = self.cache_path(category, key);
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;

        let age = SystemTime::now().duration_since(modified).ok()?;
        if age > category.ttl() {
            let _ = fs::remove_file(&path);
            return None;
        }

        debug!("cache hit: {}", path.display());
        fs::read_to_string(&path).ok()
    }

    /// Store a fetched body
    pub fn set(&self, category: CacheCategory, key: &str, body: &str) -> Result<()> {
        let path = self.cache_path(category, key);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create cache dir {}", dir.display()))?;
        }
        fs::write(&path, body)
            .with_context(|| format!("failed to write cache file {}", path.display()))?;
        Ok(())
    }

    /// Drop everything under the cache directory
    #[allow(dead_code)]
    pub fn clear(&self) -> Result<()> {
        if Path::new(&self.base_dir).exists() {
            fs::remove_dir_all(&self.base_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path());

        cache
            .set(CacheCategory::ScoutReport, "e46012d4", "<html>report</html>")
            .unwrap();

        let body = cache.get(CacheCategory::ScoutReport, "e46012d4").unwrap();
        assert_eq!(body, "<html>report</html>");
    }

    #[test]
    fn test_miss_for_absent_key() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path());
        assert!(cache.get(CacheCategory::LeagueIndex, "big5").is_none());
    }

    #[test]
    fn test_categories_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path());

        cache
            .set(CacheCategory::ScoutReport, "key", "report body")
            .unwrap();
        assert!(cache.get(CacheCategory::LeagueIndex, "key").is_none());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(dir.path());

        cache
            .set(CacheCategory::LeagueIndex, "big5", "<html></html>")
            .unwrap();
        cache.clear().unwrap();
        assert!(cache.get(CacheCategory::LeagueIndex, "big5").is_none());
    }
}
