//! Composite id resolution.
//!
//! A composite id is `<institution-tag>-<nativeId>`. The tag ends at the
//! first hyphen; the native id may itself contain hyphens.

use super::domain::{Exhibit, Institution, SourceError};
use super::source::SourceAdapter;

/// Errors from resolving a composite id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid institution: {0}")]
    InvalidInstitution(String),

    #[error("Exhibit ID is required")]
    MissingId,

    #[error("Exhibit not found: {0}")]
    NotFound(String),

    #[error("Lookup failed for {id}: {source}")]
    LookupFailed {
        id: String,
        #[source]
        source: SourceError,
    },
}

/// Split a composite id into its institution and native id.
pub fn split_id(composite_id: &str) -> Result<(Institution, &str), ResolveError> {
    let composite_id = composite_id.trim();
    if composite_id.is_empty() {
        return Err(ResolveError::MissingId);
    }

    let (tag, native_id) = composite_id
        .split_once('-')
        .unwrap_or((composite_id, ""));

    let institution = Institution::from_tag(tag)
        .ok_or_else(|| ResolveError::InvalidInstitution(tag.to_string()))?;

    if native_id.trim().is_empty() {
        return Err(ResolveError::MissingId);
    }

    Ok((institution, native_id))
}

/// Routes detail lookups to the owning source.
#[derive(Clone)]
pub struct Resolver {
    sources: Vec<SourceAdapter>,
}

impl Resolver {
    pub fn new(sources: Vec<SourceAdapter>) -> Self {
        Self { sources }
    }

    /// Fetch one exhibit by composite id.
    pub async fn resolve(&self, composite_id: &str) -> Result<Exhibit, ResolveError> {
        let (institution, native_id) = split_id(composite_id)?;

        let source = self
            .sources
            .iter()
            .find(|s| s.institution() == institution)
            .ok_or_else(|| ResolveError::InvalidInstitution(institution.tag().to_string()))?;

        tracing::debug!(source = institution.tag(), native_id, "resolving exhibit");

        source
            .fetch_by_id(native_id)
            .await
            .map_err(|e| match e {
                SourceError::NotFound => ResolveError::NotFound(composite_id.trim().to_string()),
                other => ResolveError::LookupFailed {
                    id: composite_id.trim().to_string(),
                    source: other,
                },
            })
    }
}
