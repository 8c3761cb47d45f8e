//! In-memory response cache for normalized search results.
//!
//! Keyed by provider, query, page, page size and filters. Entries expire
//! after a fixed TTL; there is no size bound and nothing is persisted.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use super::domain::{Exhibit, Institution, SearchFilters};

/// Default TTL for cached search pages.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Storage for normalized search pages.
///
/// Implementations must be safe to share across concurrent requests. A
/// duplicate miss writing the same key twice is acceptable.
pub trait ExhibitCache: Send + Sync {
    /// Fetch a live entry.
    fn get(&self, key: &str) -> Option<Vec<Exhibit>>;

    /// Store an entry, replacing any previous value.
    fn set(&self, key: &str, value: Vec<Exhibit>);

    /// Drop every entry.
    fn flush_all(&self);

    /// Drop expired entries, returning how many were removed.
    fn purge_expired(&self) -> usize {
        0
    }
}

/// Build the cache key for one provider search.
///
/// Filters are rendered as sorted `name=value` pairs, so equal logical
/// parameters always produce the same key.
pub fn cache_key(
    institution: Institution,
    query: &str,
    page: u32,
    page_size: u32,
    filters: &SearchFilters,
) -> String {
    let filters = filters
        .pairs()
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}|{}|{}|{}|{}",
        institution.tag(),
        urlencoding::encode(query.trim()),
        page,
        page_size,
        filters
    )
}

struct CacheEntry {
    value: Vec<Exhibit>,
    inserted_at: Instant,
}

/// Process-wide cache backed by a `HashMap` behind a read/write lock.
pub struct MemoryCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Create a cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries currently stored, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every expired entry.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        before - entries.len()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ExhibitCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<Exhibit>> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it unless someone refreshed it meanwhile
        let mut entries = self.entries.write();
        if entries
            .get(key)
            .is_some_and(|entry| entry.inserted_at.elapsed() >= self.ttl)
        {
            entries.remove(key);
        }
        None
    }

    fn purge_expired(&self) -> usize {
        MemoryCache::purge_expired(self)
    }

    fn set(&self, key: &str, value: Vec<Exhibit>) {
        self.entries.write().insert(
            key.to_string(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    fn flush_all(&self) {
        self.entries.write().clear();
    }
}
