//! Application state for the HTTP server.

use sqlx::SqlitePool;

use crate::auth::JwtKeys;
use crate::exhibits::ExhibitService;

/// Page size rules for exhibit search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Museum search and lookup
    pub exhibits: ExhibitService,
    /// User and collection storage
    pub db: SqlitePool,
    /// Token signing and verification
    pub jwt: JwtKeys,
    pub paging: Paging,
}

impl AppState {
    pub fn new(exhibits: ExhibitService, db: SqlitePool, jwt: JwtKeys, paging: Paging) -> Self {
        Self {
            exhibits,
            db,
            jwt,
            paging,
        }
    }
}
