//! Exhibit service - wires the providers, cache, aggregator and resolver
//!
//! This is the high-level API the HTTP layer and CLI use:
//! 1. `search` fans out over every provider via the [`Aggregator`]
//! 2. `get` resolves one composite id via the [`Resolver`]

use std::sync::Arc;
use std::time::Duration;

use super::aggregator::{Aggregator, DEFAULT_MAX_ATTEMPTS};
use super::cache::{DEFAULT_TTL, ExhibitCache, MemoryCache};
use super::domain::{Exhibit, SearchFilters};
use super::harvard::HarvardClient;
use super::resolver::{ResolveError, Resolver};
use super::smithsonian::SmithsonianClient;
use super::source::{ExhibitSource, SourceAdapter};
use super::transport::{ReqwestTransport, Transport};
use crate::config::Config;

/// Configuration for the exhibit service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub harvard_api_key: String,
    pub smithsonian_api_key: String,
    pub cache_ttl: Duration,
    pub max_attempts: u32,
    pub http_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            harvard_api_key: String::new(),
            smithsonian_api_key: String::new(),
            cache_ttl: DEFAULT_TTL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&Config> for ServiceConfig {
    fn from(config: &Config) -> Self {
        Self {
            harvard_api_key: config.credentials.harvard_api_key.clone().unwrap_or_default(),
            smithsonian_api_key: config
                .credentials
                .smithsonian_api_key
                .clone()
                .unwrap_or_default(),
            cache_ttl: config.cache.ttl(),
            max_attempts: config.aggregator.max_attempts,
            http_timeout: config.http.timeout(),
        }
    }
}

/// Search and lookup across every museum source
#[derive(Clone)]
pub struct ExhibitService {
    aggregator: Aggregator,
    resolver: Resolver,
    cache: Arc<dyn ExhibitCache>,
}

impl ExhibitService {
    /// Create a service talking to the production APIs
    pub fn new(config: &ServiceConfig) -> Result<Self, reqwest::Error> {
        let transport = Arc::new(ReqwestTransport::new(config.http_timeout)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a service over a custom transport
    pub fn with_transport(config: &ServiceConfig, transport: Arc<dyn Transport>) -> Self {
        if config.harvard_api_key.is_empty() {
            tracing::warn!("No Harvard API key configured, Harvard requests will be rejected");
        }
        if config.smithsonian_api_key.is_empty() {
            tracing::warn!("No Smithsonian API key configured, Smithsonian requests will be rejected");
        }

        let sources: Vec<Arc<dyn ExhibitSource>> = vec![
            Arc::new(HarvardClient::new(transport.clone(), &config.harvard_api_key)),
            Arc::new(SmithsonianClient::new(transport, &config.smithsonian_api_key)),
        ];
        let cache: Arc<dyn ExhibitCache> = Arc::new(MemoryCache::new(config.cache_ttl));

        Self::from_sources(sources, cache, config.max_attempts)
    }

    /// Assemble a service from arbitrary sources and cache
    pub fn from_sources(
        sources: Vec<Arc<dyn ExhibitSource>>,
        cache: Arc<dyn ExhibitCache>,
        max_attempts: u32,
    ) -> Self {
        let adapters: Vec<SourceAdapter> = sources
            .into_iter()
            .map(|s| SourceAdapter::new(s, cache.clone()))
            .collect();

        Self {
            aggregator: Aggregator::new(adapters.clone()).with_max_attempts(max_attempts),
            resolver: Resolver::new(adapters),
            cache,
        }
    }

    /// One page of exhibits with images, interleaved across sources
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: usize,
        filters: &SearchFilters,
    ) -> Vec<Exhibit> {
        self.aggregator.aggregate(query, page, page_size, filters).await
    }

    /// Resolve a composite id to one exhibit
    pub async fn get(&self, composite_id: &str) -> Result<Exhibit, ResolveError> {
        self.resolver.resolve(composite_id).await
    }

    /// Drop every cached search page
    pub fn flush_cache(&self) {
        self.cache.flush_all();
    }

    /// Drop stale cached pages
    pub fn purge_expired(&self) -> usize {
        self.cache.purge_expired()
    }
}
