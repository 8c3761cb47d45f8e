//! HTTP server module.
//!
//! Exposes exhibit search and lookup, user accounts and collections as a
//! REST API over axum.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - Bearer token middleware                                │
//! │  - JSON serialization, CORS, tracing                      │
//! └───────────────┬───────────────────────────┬──────────────┘
//!                 │                           │
//! ┌───────────────▼─────────────┐ ┌───────────▼──────────────┐
//! │  exhibits::ExhibitService   │ │  db (SQLite via sqlx)     │
//! │  - Aggregated search        │ │  - Users                  │
//! │  - Composite id lookup      │ │  - Collections            │
//! └─────────────────────────────┘ └──────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::{AppState, Paging};
