//! Service catalog: filter translation, repository and application service.

pub mod filters;
pub mod repository;
pub mod service;

pub use filters::ServiceFilter;
pub use repository::{DocumentServiceRepository, ServiceRepository};
pub use service::{CatalogService, ServiceDetails};
