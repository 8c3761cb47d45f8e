//! Harvard Art Museums API integration
//!
//! Searches the `/object` endpoint and looks up single objects.
//!
//! API docs: https://github.com/harvardartmuseums/api-docs

pub mod dto;
mod adapter;
mod client;
pub mod query;

pub use adapter::{to_exhibit, to_exhibits};
pub use client::{DEFAULT_BASE_URL, HarvardClient};
