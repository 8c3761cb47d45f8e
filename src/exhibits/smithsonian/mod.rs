//! Smithsonian Open Access API integration
//!
//! Searches `/search` and looks up single records via `/content/{id}`.
//!
//! API docs: https://edan.si.edu/openaccess/apidocs/

pub mod dto;
mod adapter;
mod client;
pub mod query;

pub use adapter::{to_exhibit, to_exhibits};
pub use client::{DEFAULT_BASE_URL, SmithsonianClient};
