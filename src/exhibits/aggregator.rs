//! Aggregator - pages through every source until a request is satisfied.
//!
//! One round fetches the current page from all sources concurrently, drops
//! exhibits without an image or already collected, interleaves what is left
//! and advances the page. Rounds continue until enough exhibits are
//! collected or `max_attempts` consecutive rounds add nothing new.
//!
//! The per-source page size shrinks as the request fills, and providers
//! page by offset, so later windows overlap earlier ones. Exhibits are
//! therefore deduplicated by id across rounds.

use std::collections::HashSet;

use futures::future::join_all;

use super::domain::{Exhibit, Institution, SearchFilters};
use super::source::{SourceAdapter, or_empty};

/// Consecutive empty rounds before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Fans a search out over every configured source.
#[derive(Clone)]
pub struct Aggregator {
    sources: Vec<SourceAdapter>,
    max_attempts: u32,
}

impl Aggregator {
    pub fn new(sources: Vec<SourceAdapter>) -> Self {
        Self {
            sources,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn sources(&self) -> &[SourceAdapter] {
        &self.sources
    }

    /// Adapter for one institution, if configured.
    pub fn source(&self, institution: Institution) -> Option<&SourceAdapter> {
        self.sources.iter().find(|s| s.institution() == institution)
    }

    /// Collect up to `desired_count` exhibits with images, starting at `start_page`.
    ///
    /// Best effort: returns fewer when the sources run dry. Failing sources
    /// count as empty. No id appears twice in the result.
    pub async fn aggregate(
        &self,
        query: &str,
        start_page: u32,
        desired_count: usize,
        filters: &SearchFilters,
    ) -> Vec<Exhibit> {
        let mut exhibits: Vec<Exhibit> = Vec::with_capacity(desired_count);
        if desired_count == 0 || self.sources.is_empty() {
            return exhibits;
        }

        let mut seen: HashSet<String> = HashSet::with_capacity(desired_count);
        let mut current_page = start_page.max(1);
        let mut empty_attempts = 0;
        let mut rounds = 0;

        while exhibits.len() < desired_count && empty_attempts < self.max_attempts {
            let remaining = desired_count - exhibits.len();
            let per_source = fetch_size(remaining, self.sources.len());
            rounds += 1;

            let results = join_all(self.sources.iter().map(|source| async move {
                let result = source
                    .try_search(query, current_page, per_source, filters)
                    .await;
                or_empty(source.institution(), result)
            }))
            .await;

            let fresh: Vec<Vec<Exhibit>> = results
                .into_iter()
                .map(|list| {
                    list.into_iter()
                        .filter(|e| e.has_image() && seen.insert(e.id.clone()))
                        .collect()
                })
                .collect();

            let found: usize = fresh.iter().map(Vec::len).sum();
            tracing::debug!(
                page = current_page,
                per_source,
                found,
                "aggregate round"
            );

            if found == 0 {
                empty_attempts += 1;
            } else {
                empty_attempts = 0;
            }

            exhibits.extend(interleave(fresh));
            current_page = current_page.saturating_add(1);
        }

        exhibits.truncate(desired_count);
        tracing::info!(
            query = %query,
            requested = desired_count,
            returned = exhibits.len(),
            rounds,
            "aggregate complete"
        );
        exhibits
    }
}

/// Per-source page size: the remaining need split evenly, rounded up.
pub fn fetch_size(remaining: usize, source_count: usize) -> u32 {
    let per_source = remaining.div_ceil(source_count.max(1));
    u32::try_from(per_source).unwrap_or(u32::MAX).max(1)
}

/// Fair interleave: `a[0], b[0], a[1], b[1], ...`; shorter lists drop out.
pub fn interleave(lists: Vec<Vec<Exhibit>>) -> Vec<Exhibit> {
    let total = lists.iter().map(Vec::len).sum();
    let mut iters: Vec<_> = lists.into_iter().map(Vec::into_iter).collect();
    let mut merged = Vec::with_capacity(total);

    while merged.len() < total {
        for iter in iters.iter_mut() {
            if let Some(exhibit) = iter.next() {
                merged.push(exhibit);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::exhibits::cache::MemoryCache;
    use crate::exhibits::domain::SourceError;
    use crate::exhibits::source::mocks::MockSource;
    use crate::test_utils::{mock_exhibit, mock_exhibit_for};

    fn aggregator(sources: Vec<Arc<MockSource>>) -> Aggregator {
        let cache = Arc::new(MemoryCache::default());
        Aggregator::new(
            sources
                .into_iter()
                .map(|s| SourceAdapter::new(s, cache.clone()))
                .collect(),
        )
    }

    fn ids(exhibits: &[Exhibit]) -> Vec<&str> {
        exhibits.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_fetch_size_scales_with_need() {
        assert_eq!(fetch_size(20, 2), 10);
        assert_eq!(fetch_size(7, 2), 4);
        assert_eq!(fetch_size(1, 2), 1);
        assert_eq!(fetch_size(100, 2), 50);
        assert_eq!(fetch_size(5, 0), 5);
    }

    #[test]
    fn test_interleave_alternates() {
        let a = vec![mock_exhibit("harvard-1"), mock_exhibit("harvard-2"), mock_exhibit("harvard-3")];
        let b = vec![mock_exhibit("smithsonian-1")];

        let merged = interleave(vec![a, b]);

        assert_eq!(
            ids(&merged),
            vec!["harvard-1", "smithsonian-1", "harvard-2", "harvard-3"]
        );
    }

    #[test]
    fn test_interleave_empty() {
        assert!(interleave(vec![vec![], vec![]]).is_empty());
    }

    #[tokio::test]
    async fn test_fills_page_from_both_sources() {
        let harvard = Arc::new(MockSource::numbered(Institution::Harvard, 3, 10));
        let smithsonian = Arc::new(MockSource::numbered(Institution::Smithsonian, 3, 10));
        let agg = aggregator(vec![harvard.clone(), smithsonian.clone()]);

        let exhibits = agg.aggregate("", 1, 4, &SearchFilters::default()).await;

        assert_eq!(
            ids(&exhibits),
            vec!["harvard-1", "smithsonian-1", "harvard-2", "smithsonian-2"]
        );
        assert_eq!(harvard.call_count(), 1);
        assert_eq!(harvard.requested_sizes(), vec![2]);
    }

    #[tokio::test]
    async fn test_drops_exhibits_without_images() {
        let mut no_image = mock_exhibit_for(Institution::Harvard, "2");
        no_image.image_url = "  ".into();
        let harvard = Arc::new(MockSource::with_pages(
            Institution::Harvard,
            vec![vec![mock_exhibit_for(Institution::Harvard, "1"), no_image]],
        ));
        let smithsonian = Arc::new(MockSource::empty(Institution::Smithsonian));
        let agg = aggregator(vec![harvard, smithsonian]);

        let exhibits = agg.aggregate("", 1, 10, &SearchFilters::default()).await;

        assert_eq!(ids(&exhibits), vec!["harvard-1"]);
        assert!(exhibits.iter().all(Exhibit::has_image));
    }

    #[tokio::test]
    async fn test_advances_pages_until_satisfied() {
        // Two per page from Harvard only; 5 wanted
        let harvard = Arc::new(MockSource::numbered(Institution::Harvard, 5, 2));
        let smithsonian = Arc::new(MockSource::empty(Institution::Smithsonian));
        let agg = aggregator(vec![harvard.clone(), smithsonian]);

        let exhibits = agg.aggregate("", 1, 5, &SearchFilters::default()).await;

        assert_eq!(exhibits.len(), 5);
        assert_eq!(
            ids(&exhibits),
            vec!["harvard-1", "harvard-2", "harvard-3", "harvard-4", "harvard-5"]
        );
        // Asked for ceil(5/2), ceil(3/2), ceil(1/2)
        assert_eq!(harvard.requested_sizes(), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_stops_after_max_empty_attempts() {
        let harvard = Arc::new(MockSource::empty(Institution::Harvard));
        let smithsonian = Arc::new(MockSource::empty(Institution::Smithsonian));
        let agg = aggregator(vec![harvard.clone(), smithsonian.clone()]).with_max_attempts(3);

        let exhibits = agg.aggregate("nothing", 1, 10, &SearchFilters::default()).await;

        assert!(exhibits.is_empty());
        assert_eq!(harvard.call_count(), 3);
        assert_eq!(smithsonian.call_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_counter_resets_on_results() {
        // Pages 1-2 empty, page 3 has results, then dry
        let harvard = Arc::new(MockSource::with_pages(
            Institution::Harvard,
            vec![
                vec![],
                vec![],
                vec![mock_exhibit_for(Institution::Harvard, "9")],
            ],
        ));
        let smithsonian = Arc::new(MockSource::empty(Institution::Smithsonian));
        let agg = aggregator(vec![harvard.clone(), smithsonian]).with_max_attempts(3);

        let exhibits = agg.aggregate("", 1, 10, &SearchFilters::default()).await;

        assert_eq!(ids(&exhibits), vec!["harvard-9"]);
        // 2 empty + 1 hit + 3 empty
        assert_eq!(harvard.call_count(), 6);
    }

    #[tokio::test]
    async fn test_failing_source_does_not_fail_aggregate() {
        let harvard = Arc::new(MockSource::with_error(
            Institution::Harvard,
            SourceError::Network("down".into()),
        ));
        let smithsonian = Arc::new(MockSource::numbered(Institution::Smithsonian, 5, 5));
        let agg = aggregator(vec![harvard, smithsonian]);

        let exhibits = agg.aggregate("", 1, 6, &SearchFilters::default()).await;

        assert_eq!(exhibits.len(), 6);
        assert!(exhibits.iter().all(|e| e.institution == Institution::Smithsonian));
    }

    #[tokio::test]
    async fn test_never_exceeds_desired_count() {
        let harvard = Arc::new(MockSource::numbered(Institution::Harvard, 2, 50));
        let smithsonian = Arc::new(MockSource::numbered(Institution::Smithsonian, 2, 50));
        let agg = aggregator(vec![harvard, smithsonian]);

        for desired in [1, 3, 7, 20] {
            let exhibits = agg.aggregate("", 1, desired, &SearchFilters::default()).await;
            assert_eq!(exhibits.len(), desired);
            assert!(exhibits.iter().all(Exhibit::has_image));
        }
    }

    #[tokio::test]
    async fn test_offset_paging_never_repeats_exhibits() {
        // Shrinking page sizes make offset windows overlap across rounds
        let harvard = Arc::new(MockSource::offset_paged(Institution::Harvard, 40));
        let smithsonian = Arc::new(MockSource::offset_paged(Institution::Smithsonian, 40));
        let agg = aggregator(vec![harvard.clone(), smithsonian]);

        let exhibits = agg.aggregate("", 1, 10, &SearchFilters::default()).await;

        let unique: HashSet<&str> = ids(&exhibits).into_iter().collect();
        assert_eq!(exhibits.len(), 10);
        assert_eq!(unique.len(), 10);
        assert!(exhibits.iter().all(Exhibit::has_image));
        assert_eq!(
            ids(&exhibits)[..6],
            ["harvard-1", "smithsonian-1", "harvard-3", "smithsonian-3", "harvard-5", "smithsonian-5"]
        );
        // 5, then 2 per round once six are in, then 1 once eight are in
        assert_eq!(harvard.requested_sizes(), vec![5, 2, 2, 2, 1, 1, 1, 1, 1]);
    }

    #[tokio::test]
    async fn test_rounds_with_only_repeats_count_as_empty() {
        // The same exhibit on every page never fills the request
        let repeat = mock_exhibit_for(Institution::Harvard, "1");
        let harvard = Arc::new(MockSource::with_pages(
            Institution::Harvard,
            vec![vec![repeat]; 10],
        ));
        let agg = aggregator(vec![harvard.clone()]).with_max_attempts(2);

        let exhibits = agg.aggregate("", 1, 5, &SearchFilters::default()).await;

        assert_eq!(ids(&exhibits), vec!["harvard-1"]);
        assert_eq!(harvard.call_count(), 3);
    }

    #[tokio::test]
    async fn test_zero_desired_fetches_nothing() {
        let harvard = Arc::new(MockSource::numbered(Institution::Harvard, 1, 5));
        let agg = aggregator(vec![harvard.clone()]);

        assert!(agg.aggregate("", 1, 0, &SearchFilters::default()).await.is_empty());
        assert_eq!(harvard.call_count(), 0);
    }

    #[tokio::test]
    async fn test_start_page_respected() {
        let harvard = Arc::new(MockSource::numbered(Institution::Harvard, 3, 2));
        let agg = aggregator(vec![harvard]);

        let exhibits = agg.aggregate("", 2, 2, &SearchFilters::default()).await;

        assert_eq!(ids(&exhibits), vec!["harvard-3", "harvard-4"]);
    }

    #[tokio::test]
    async fn test_source_lookup_by_institution() {
        let agg = aggregator(vec![Arc::new(MockSource::empty(Institution::Smithsonian))]);

        assert!(agg.source(Institution::Smithsonian).is_some());
        assert!(agg.source(Institution::Harvard).is_none());
    }
}
