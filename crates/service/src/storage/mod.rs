//! Storage abstractions for the service layer
//!
//! A small document-store contract (`DocumentStore` + `Query`) and a
//! file-backed implementation that keeps each collection as a JSON file.

pub mod query;
pub mod document_store;
pub mod json_document_store;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;
use crate::storage::document_store::NATIVE_ID_FIELD;
use crate::storage::query::Document;

pub use document_store::DocumentStore;
pub use json_document_store::JsonDocumentStore;
pub use query::{FindOptions, Query, Sort, SortDirection};

/// Serialize an entity (or partial update) into a document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, ServiceError> {
    match serde_json::to_value(value).map_err(|e| ServiceError::Internal(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(ServiceError::Internal(format!("expected a JSON object, got {other}"))),
    }
}

/// Decode a stored document into an entity, dropping the native `_id`.
pub fn from_document<T: DeserializeOwned>(mut doc: Document) -> Result<T, ServiceError> {
    doc.remove(NATIVE_ID_FIELD);
    serde_json::from_value(Value::Object(doc))
        .map_err(|e| ServiceError::Internal(format!("malformed stored document: {e}")))
}

/// Live (not soft-deleted) entity with the given public `id`.
pub fn live_by_id(id: &str) -> Query {
    Query::new().eq("id", id).eq("is_deleted", false)
}

/// Current time as stored in `created_at` / `updated_at`.
pub fn now_value() -> Result<Value, ServiceError> {
    serde_json::to_value(chrono::Utc::now()).map_err(|e| ServiceError::Internal(e.to_string()))
}
