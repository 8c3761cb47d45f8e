//! Museum exhibits - searches and normalizes artworks from external museum APIs.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - The canonical [`Exhibit`] and friends
//! - **API DTOs** (`harvard/dto.rs`, `smithsonian/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models, using `normalize.rs`
//! - **Clients** - HTTP clients for external APIs, over a [`Transport`]
//! - **Cache** - Shared TTL cache of normalized search pages
//! - **Aggregator** / **Resolver** - Multi-source search and composite-id lookup
//! - **Service** - Wires everything together from config
//!
//! # Usage
//!
//! ```ignore
//! use exhibits::{ExhibitService, ServiceConfig, SearchFilters};
//!
//! let service = ExhibitService::new(&ServiceConfig::from(&config))?;
//!
//! let page = service.search("vase", 1, 20, &SearchFilters::default()).await;
//! let exhibit = service.get("harvard-299843").await?;
//! ```

pub mod aggregator;
pub mod cache;
pub mod domain;
pub mod harvard;
pub mod normalize;
pub mod resolver;
pub mod service;
pub mod smithsonian;
pub mod source;
pub mod transport;

pub use aggregator::Aggregator;
pub use cache::{ExhibitCache, MemoryCache};
pub use domain::{Exhibit, HistoricalEra, Institution, SearchFilters, SourceError};
pub use resolver::{ResolveError, Resolver};
pub use service::{ExhibitService, ServiceConfig};
pub use source::{ExhibitSource, SourceAdapter};
pub use transport::{ReqwestTransport, Transport};
