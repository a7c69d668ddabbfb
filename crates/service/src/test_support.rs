#![cfg(test)]
use async_trait::async_trait;
use models::service::NewService;
use models::value_objects::DEFAULT_CURRENCY;
use models::vendor::NewVendor;

use crate::errors::ServiceError;
use crate::storage::query::{Document, FindOptions, Query};
use crate::storage::DocumentStore;

pub fn new_service(name: &str, category: &str, price: f64, vendor_id: &str, tags: &[&str]) -> NewService {
    NewService {
        name: [("en".to_string(), name.to_string())].into_iter().collect(),
        category: category.to_string(),
        base_price: Some(price),
        currency: DEFAULT_CURRENCY.to_string(),
        vendor_id: vendor_id.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

pub fn new_vendor(id: Option<&str>, name: &str) -> NewVendor {
    NewVendor { id: id.map(str::to_string), name: name.to_string(), ..Default::default() }
}

/// Store whose every call fails, for checking that outages surface as errors.
pub struct FailingStore;

fn down() -> ServiceError {
    ServiceError::Store("store unavailable".into())
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(&self, _: &str, _: Document) -> Result<(), ServiceError> { Err(down()) }
    async fn find_one(&self, _: &str, _: &Query) -> Result<Option<Document>, ServiceError> { Err(down()) }
    async fn find(&self, _: &str, _: &Query, _: &FindOptions) -> Result<Vec<Document>, ServiceError> { Err(down()) }
    async fn count(&self, _: &str, _: &Query) -> Result<u64, ServiceError> { Err(down()) }
    async fn update_one(&self, _: &str, _: &Query, _: Document) -> Result<Option<Document>, ServiceError> { Err(down()) }
    async fn close(&self) -> Result<(), ServiceError> { Ok(()) }
}
