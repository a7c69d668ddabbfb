//! Free-text search over services.
//!
//! No ranking backend exists yet; [`NoopSearchIndex`] keeps the call contract
//! so the HTTP surface is stable when one is plugged in.

pub mod index;
pub mod service;

pub use index::{NoopSearchIndex, SearchIndex};
pub use service::SearchService;
