use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use models::service::{NewService, Service, UpdateService, COLLECTION};
use serde_json::Value;
use tracing::debug;

use crate::catalog::filters::ServiceFilter;
use crate::errors::ServiceError;
use crate::listing::ListOptions;
use crate::pagination::{Page, PageMeta};
use crate::storage::{from_document, live_by_id, now_value, to_document, DocumentStore};

/// Persistence contract for services. Soft-deleted services are invisible to
/// every operation here.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn list(&self, filter: &ServiceFilter, options: &ListOptions) -> Result<Page<Service>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<Service>, ServiceError>;
    async fn create(&self, input: NewService) -> Result<Service, ServiceError>;
    /// Merge the supplied fields and refresh `updated_at`; `NotFound` if no
    /// live record has this id. Never inserts.
    async fn update(&self, id: &str, input: UpdateService) -> Result<Service, ServiceError>;
    /// Flip `is_deleted`; returns whether a live record was found.
    async fn soft_delete(&self, id: &str) -> Result<bool, ServiceError>;
}

/// Document-store-backed repository implementation.
pub struct DocumentServiceRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentServiceRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self { Self { store } }
}

#[async_trait]
impl ServiceRepository for DocumentServiceRepository {
    async fn list(&self, filter: &ServiceFilter, options: &ListOptions) -> Result<Page<Service>, ServiceError> {
        let query = filter.to_query();
        let total = self.store.count(COLLECTION, &query).await?;
        let docs = self.store.find(COLLECTION, &query, &options.find_options()).await?;
        let items = docs.into_iter().map(from_document).collect::<Result<Vec<Service>, _>>()?;
        debug!(returned = items.len(), total, "services listed");
        Ok(Page { items, meta: PageMeta::new(options.pagination, total) })
    }

    async fn get(&self, id: &str) -> Result<Option<Service>, ServiceError> {
        self.store
            .find_one(COLLECTION, &live_by_id(id))
            .await?
            .map(from_document)
            .transpose()
    }

    async fn create(&self, input: NewService) -> Result<Service, ServiceError> {
        input.validate()?;
        let record = input.into_service(Utc::now());
        self.store.insert_one(COLLECTION, to_document(&record)?).await?;
        Ok(record)
    }

    async fn update(&self, id: &str, input: UpdateService) -> Result<Service, ServiceError> {
        input.validate()?;
        let mut set = to_document(&input)?;
        set.insert("updated_at".into(), now_value()?);
        match self.store.update_one(COLLECTION, &live_by_id(id), set).await? {
            Some(doc) => from_document(doc),
            None => Err(ServiceError::not_found("service", id)),
        }
    }

    async fn soft_delete(&self, id: &str) -> Result<bool, ServiceError> {
        let mut set = serde_json::Map::new();
        set.insert("is_deleted".into(), Value::Bool(true));
        set.insert("updated_at".into(), now_value()?);
        Ok(self.store.update_one(COLLECTION, &live_by_id(id), set).await?.is_some())
    }
}
