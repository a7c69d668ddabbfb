//! Catalog domain models.
//!
//! Entities (`Service`, `Vendor`) carry identity and lifecycle fields; value
//! objects are owned by an entity and embedded as sub-documents when stored.

pub mod errors;
pub mod fields;
pub mod value_objects;
pub mod service;
pub mod vendor;

/// Status assigned to new entities when the caller does not supply one.
pub const DEFAULT_STATUS: &str = "active";

/// Generate a fresh public identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Treat a missing or blank identifier as absent.
pub(crate) fn supplied_id(id: Option<String>) -> Option<String> {
    id.filter(|s| !s.trim().is_empty())
}
