//! Provider seam and the cache-aware adapter around it.
//!
//! Each museum client implements [`ExhibitSource`]: one uncached, typed
//! page fetch and one single-record lookup. [`SourceAdapter`] adds the shared
//! response cache on top and offers the availability-first `search`.

use std::sync::Arc;

use async_trait::async_trait;

use super::cache::{ExhibitCache, cache_key};
use super::domain::{Exhibit, Institution, SearchFilters, SourceError};

/// One museum provider.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait ExhibitSource: Send + Sync {
    /// Which institution this provider serves.
    fn institution(&self) -> Institution;

    /// Fetch and normalize one page of search results.
    async fn search_page(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
        filters: &SearchFilters,
    ) -> Result<Vec<Exhibit>, SourceError>;

    /// Look up one record by its provider-native id.
    async fn lookup(&self, native_id: &str) -> Result<Exhibit, SourceError>;
}

/// A provider plus the shared response cache.
#[derive(Clone)]
pub struct SourceAdapter {
    source: Arc<dyn ExhibitSource>,
    cache: Arc<dyn ExhibitCache>,
}

impl SourceAdapter {
    pub fn new(source: Arc<dyn ExhibitSource>, cache: Arc<dyn ExhibitCache>) -> Self {
        Self { source, cache }
    }

    pub fn institution(&self) -> Institution {
        self.source.institution()
    }

    /// Cached search that reports failures.
    ///
    /// A hit returns the stored list unchanged. A successful miss stores the
    /// normalized list; failures are never cached.
    pub async fn try_search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
        filters: &SearchFilters,
    ) -> Result<Vec<Exhibit>, SourceError> {
        let institution = self.institution();
        let key = cache_key(institution, query, page, page_size, filters);

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(source = institution.tag(), key = %key, "cache hit");
            return Ok(cached);
        }

        tracing::debug!(source = institution.tag(), key = %key, "cache miss, fetching");
        let exhibits = self
            .source
            .search_page(query, page, page_size, filters)
            .await?;
        self.cache.set(&key, exhibits.clone());

        Ok(exhibits)
    }

    /// Cached search that never fails: errors become an empty list.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
        filters: &SearchFilters,
    ) -> Vec<Exhibit> {
        or_empty(
            self.institution(),
            self.try_search(query, page, page_size, filters).await,
        )
    }

    /// Single-record lookup. Not cached, and errors propagate.
    pub async fn fetch_by_id(&self, native_id: &str) -> Result<Exhibit, SourceError> {
        self.source.lookup(native_id).await
    }
}

// Implement the seam for the real clients

#[async_trait]
impl ExhibitSource for super::harvard::HarvardClient {
    fn institution(&self) -> Institution {
        Institution::Harvard
    }

    async fn search_page(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
        filters: &SearchFilters,
    ) -> Result<Vec<Exhibit>, SourceError> {
        self.search_page(query, page, page_size, filters).await
    }

    async fn lookup(&self, native_id: &str) -> Result<Exhibit, SourceError> {
        self.lookup(native_id).await
    }
}

#[async_trait]
impl ExhibitSource for super::smithsonian::SmithsonianClient {
    fn institution(&self) -> Institution {
        Institution::Smithsonian
    }

    async fn search_page(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
        filters: &SearchFilters,
    ) -> Result<Vec<Exhibit>, SourceError> {
        self.search_page(query, page, page_size, filters).await
    }

    async fn lookup(&self, native_id: &str) -> Result<Exhibit, SourceError> {
        self.lookup(native_id).await
    }
}

/// Availability over correctness: a failed source contributes nothing.
pub(crate) fn or_empty(
    institution: Institution,
    result: Result<Vec<Exhibit>, SourceError>,
) -> Vec<Exhibit> {
    match result {
        Ok(exhibits) => exhibits,
        Err(e) => {
            tracing::warn!(source = institution.tag(), error = %e, "search failed, treating as empty");
            Vec::new()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mocks::MockSource;
    use super::*;
    use crate::exhibits::cache::MemoryCache;

    fn adapter(source: Arc<MockSource>) -> (SourceAdapter, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::default());
        (SourceAdapter::new(source, cache.clone()), cache)
    }

    #[tokio::test]
    async fn test_second_search_served_from_cache() {
        let source = Arc::new(MockSource::numbered(Institution::Harvard, 1, 3));
        let (adapter, _cache) = adapter(source.clone());
        let filters = SearchFilters::default();

        let first = adapter.search("cats", 1, 3, &filters).await;
        let second = adapter.search("cats", 1, 3, &filters).await;

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_flush_forces_fresh_fetch() {
        let source = Arc::new(MockSource::numbered(Institution::Harvard, 1, 3));
        let (adapter, cache) = adapter(source.clone());
        let filters = SearchFilters::default();

        adapter.search("cats", 1, 3, &filters).await;
        cache.flush_all();
        adapter.search("cats", 1, 3, &filters).await;

        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_becomes_empty_and_is_not_cached() {
        let source = Arc::new(MockSource::with_error(
            Institution::Smithsonian,
            SourceError::Network("connection refused".into()),
        ));
        let (adapter, cache) = adapter(source.clone());
        let filters = SearchFilters::default();

        assert!(adapter.search("cats", 1, 5, &filters).await.is_empty());
        assert!(cache.is_empty());

        let typed = adapter.try_search("cats", 1, 5, &filters).await;
        assert!(matches!(typed, Err(SourceError::Network(_))));
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_by_id_propagates_not_found() {
        let source = Arc::new(MockSource::empty(Institution::Harvard));
        let (adapter, _cache) = adapter(source);

        assert_eq!(adapter.fetch_by_id("123").await, Err(SourceError::NotFound));
    }
}
