//! Time-boxed settings cache.
//!
//! Reads of slow-changing site settings go through one per-process cache
//! that flattens each section into a `key -> value` map and keeps it for
//! a bounded window. Fetch failures never reach callers: the last good
//! map is served when one exists, an empty map otherwise. Concurrent
//! readers during a refresh may observe either the stale or the fresh
//! value; settings are rare administrative edits, not correctness-
//! critical data.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use persistence::repositories::SiteSettingRepository;

use crate::middleware::metrics::record_settings_cache_lookup;

/// Flattened section settings.
pub type SettingsMap = HashMap<String, String>;

/// Clock seam so tests can drive TTL expiry deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Upstream source of section settings.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn fetch_section(&self, section: &str) -> Result<SettingsMap, sqlx::Error>;
}

#[async_trait]
impl SettingsSource for SiteSettingRepository {
    async fn fetch_section(&self, section: &str) -> Result<SettingsMap, sqlx::Error> {
        let rows = self.section_rows(section).await?;
        Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
    }
}

struct CachedSection {
    data: SettingsMap,
    cached_at: Instant,
}

/// Per-process settings cache with injected clock and TTL.
pub struct SettingsService {
    source: Arc<dyn SettingsSource>,
    cache: RwLock<HashMap<String, CachedSection>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SettingsService {
    pub fn new(source: Arc<dyn SettingsSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Returns the flattened settings map for one section.
    ///
    /// Served from cache while the entry is younger than the TTL; a
    /// fresh fetch otherwise. A failing fetch falls back to the last
    /// cached map for the section, or an empty map on a cold cache.
    pub async fn get(&self, section: &str) -> SettingsMap {
        let now = self.clock.now();

        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(section) {
                if now.duration_since(entry.cached_at) < self.ttl {
                    record_settings_cache_lookup("hit");
                    return entry.data.clone();
                }
            }
        }

        match self.source.fetch_section(section).await {
            Ok(data) => {
                record_settings_cache_lookup("refresh");
                let mut cache = self.cache.write().await;
                cache.insert(
                    section.to_string(),
                    CachedSection {
                        data: data.clone(),
                        cached_at: now,
                    },
                );
                data
            }
            Err(e) => {
                tracing::warn!("Settings fetch failed for section {}: {}", section, e);
                record_settings_cache_lookup("stale_fallback");
                let cache = self.cache.read().await;
                cache
                    .get(section)
                    .map(|entry| entry.data.clone())
                    .unwrap_or_default()
            }
        }
    }

    /// Drops one section's entry so the next read fetches fresh data.
    pub async fn invalidate(&self, section: &str) {
        self.cache.write().await.remove(section);
    }

    /// Drops every cached section.
    pub async fn invalidate_all(&self) {
        self.cache.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Clock whose time only moves when the test advances it.
    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, duration: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += duration;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    /// Source that counts fetches and can be switched into failure mode.
    struct FakeSource {
        fetches: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                fail: std::sync::atomic::AtomicBool::new(false),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SettingsSource for FakeSource {
        async fn fetch_section(&self, section: &str) -> Result<SettingsMap, sqlx::Error> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(sqlx::Error::PoolClosed);
            }
            let mut map = SettingsMap::new();
            map.insert("section".to_string(), section.to_string());
            map.insert("hero_title".to_string(), "採用をもっと簡単に".to_string());
            Ok(map)
        }
    }

    fn service(
        source: Arc<FakeSource>,
        clock: Arc<ManualClock>,
        ttl_secs: u64,
    ) -> SettingsService {
        SettingsService::new(source, Duration::from_secs(ttl_secs), clock)
    }

    #[tokio::test]
    async fn test_within_ttl_serves_cache_without_fetch() {
        let source = Arc::new(FakeSource::new());
        let clock = Arc::new(ManualClock::new());
        let cache = service(source.clone(), clock.clone(), 60);

        let first = cache.get("business").await;
        assert_eq!(source.fetch_count(), 1);

        clock.advance(Duration::from_secs(59));
        let second = cache.get("business").await;
        assert_eq!(source.fetch_count(), 1, "no upstream query within TTL");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_after_ttl_fetches_exactly_once() {
        let source = Arc::new(FakeSource::new());
        let clock = Arc::new(ManualClock::new());
        let cache = service(source.clone(), clock.clone(), 60);

        cache.get("business").await;
        clock.advance(Duration::from_secs(61));
        cache.get("business").await;
        assert_eq!(source.fetch_count(), 2, "exactly one new query after TTL");
    }

    #[tokio::test]
    async fn test_sections_are_cached_independently() {
        let source = Arc::new(FakeSource::new());
        let clock = Arc::new(ManualClock::new());
        let cache = service(source.clone(), clock.clone(), 60);

        let business = cache.get("business").await;
        let worker = cache.get("worker").await;
        assert_eq!(source.fetch_count(), 2);
        assert_eq!(business.get("section"), Some(&"business".to_string()));
        assert_eq!(worker.get("section"), Some(&"worker".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_failure_serves_stale_entry() {
        let source = Arc::new(FakeSource::new());
        let clock = Arc::new(ManualClock::new());
        let cache = service(source.clone(), clock.clone(), 60);

        let fresh = cache.get("business").await;
        clock.advance(Duration::from_secs(61));
        source.set_failing(true);

        let stale = cache.get("business").await;
        assert_eq!(stale, fresh, "stale map is served when the refresh fails");
    }

    #[tokio::test]
    async fn test_cold_cache_with_failing_source_is_empty() {
        let source = Arc::new(FakeSource::new());
        source.set_failing(true);
        let clock = Arc::new(ManualClock::new());
        let cache = service(source.clone(), clock.clone(), 60);

        let map = cache.get("business").await;
        assert!(map.is_empty(), "cold cache plus failed fetch yields empty map");
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = Arc::new(FakeSource::new());
        let clock = Arc::new(ManualClock::new());
        let cache = service(source.clone(), clock.clone(), 60);

        cache.get("business").await;
        cache.invalidate("business").await;
        cache.get("business").await;
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_every_section() {
        let source = Arc::new(FakeSource::new());
        let clock = Arc::new(ManualClock::new());
        let cache = service(source.clone(), clock.clone(), 60);

        cache.get("business").await;
        cache.get("worker").await;
        cache.invalidate_all().await;
        cache.get("business").await;
        cache.get("worker").await;
        assert_eq!(source.fetch_count(), 4);
    }

    #[tokio::test]
    async fn test_invalidate_unknown_section_is_noop() {
        let source = Arc::new(FakeSource::new());
        let clock = Arc::new(ManualClock::new());
        let cache = service(source.clone(), clock.clone(), 60);

        cache.invalidate("never-fetched").await;
        cache.get("business").await;
        assert_eq!(source.fetch_count(), 1);
    }
}
