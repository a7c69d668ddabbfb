use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::storage::query::{Document, FindOptions, Query};

/// Field holding the store's native identifier on every document. It is
/// distinct from an entity's public `id` and never leaves the repositories.
pub const NATIVE_ID_FIELD: &str = "_id";

/// Document store handle shared by the repositories.
///
/// Every operation touches a single document (or reads a consistent
/// snapshot) and is atomic on its own; there are no multi-document
/// transactions.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document, assigning its native `_id`.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), ServiceError>;

    /// First document matching `query` in store order.
    async fn find_one(&self, collection: &str, query: &Query) -> Result<Option<Document>, ServiceError>;

    async fn find(&self, collection: &str, query: &Query, options: &FindOptions) -> Result<Vec<Document>, ServiceError>;

    async fn count(&self, collection: &str, query: &Query) -> Result<u64, ServiceError>;

    /// Merge `set` into the first document matching `query` (top-level keys
    /// replaced) and return the post-update document, or `None` if nothing
    /// matched.
    async fn update_one(&self, collection: &str, query: &Query, set: Document) -> Result<Option<Document>, ServiceError>;

    /// Flush and release the handle. Later calls fail with a store error.
    async fn close(&self) -> Result<(), ServiceError>;
}
