//! Service layer for the catalog.
//! - Document store contract and the JSON file-backed store.
//! - Filter, pagination and sort translation into store queries.
//! - Repositories and application services for services, vendors and search.

pub mod errors;
pub mod runtime;
pub mod pagination;
pub mod listing;
pub mod storage;
pub mod catalog;
pub mod vendor;
pub mod search;
#[cfg(test)]
pub mod test_support;
