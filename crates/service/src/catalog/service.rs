use std::sync::Arc;

use models::{service::{NewService, Service, UpdateService}, vendor::Vendor};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::catalog::filters::ServiceFilter;
use crate::catalog::repository::ServiceRepository;
use crate::errors::ServiceError;
use crate::listing::{ListOptions, Params};
use crate::pagination::Page;
use crate::vendor::repository::VendorRepository;

/// Service record enriched with its vendor at read time. `vendorDetails` is
/// never persisted and is omitted when the vendor reference dangles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDetails {
    #[serde(flatten)]
    pub service: Service,
    #[serde(rename = "vendorDetails", skip_serializing_if = "Option::is_none")]
    pub vendor_details: Option<Vendor>,
}

/// Application service for the service catalog: listing, lifecycle and
/// vendor enrichment.
pub struct CatalogService<S: ServiceRepository, V: VendorRepository> {
    services: Arc<S>,
    vendors: Arc<V>,
}

impl<S: ServiceRepository, V: VendorRepository> CatalogService<S, V> {
    pub fn new(services: Arc<S>, vendors: Arc<V>) -> Self { Self { services, vendors } }

    /// List non-deleted services matching the filter keys in `params`
    /// (pagination and sort keys are read from the same map).
    #[instrument(skip(self, params))]
    pub async fn list_services(&self, params: &Params) -> Result<Page<Service>, ServiceError> {
        let filter = ServiceFilter::from_params(params)?;
        let options = ListOptions::from_params(params)?;
        let page = self.services.list(&filter, &options).await?;
        info!(returned = page.items.len(), total = page.meta.total_items, "list_services");
        Ok(page)
    }

    /// Same contract as [`list_services`](Self::list_services), fed from a JSON body.
    #[instrument(skip(self, params))]
    pub async fn filter_services(&self, params: &Params) -> Result<Page<Service>, ServiceError> {
        self.list_services(params).await
    }

    /// Fetch a service and attach its vendor as `vendorDetails`.
    #[instrument(skip(self))]
    pub async fn get_service_details(&self, id: &str) -> Result<Option<ServiceDetails>, ServiceError> {
        let Some(service) = self.services.get(id).await? else {
            info!(%id, "service not found");
            return Ok(None);
        };
        let vendor_details = self.vendors.get(&service.vendor_id).await?;
        if vendor_details.is_none() {
            warn!(%id, vendor_id = %service.vendor_id, "vendor reference is dangling; returning service without vendorDetails");
        }
        Ok(Some(ServiceDetails { service, vendor_details }))
    }

    #[instrument(skip(self, input), fields(category = %input.category, vendor_id = %input.vendor_id))]
    pub async fn create_service(&self, input: NewService) -> Result<Service, ServiceError> {
        let created = self.services.create(input).await?;
        info!(id = %created.id, "service_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_service(&self, id: &str, input: UpdateService) -> Result<Service, ServiceError> {
        let updated = self.services.update(id, input).await?;
        info!(%id, "service_updated");
        Ok(updated)
    }

    /// Soft-delete. A miss (unknown or already deleted) is reported as
    /// `false` and logged, never raised.
    #[instrument(skip(self))]
    pub async fn delete_service(&self, id: &str) -> Result<bool, ServiceError> {
        let deleted = self.services.soft_delete(id).await?;
        if deleted {
            info!(%id, "service_soft_deleted");
        } else {
            warn!(%id, "soft delete requested for unknown or already deleted service");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repository::DocumentServiceRepository;
    use crate::listing::params_from_body;
    use crate::storage::{DocumentStore, JsonDocumentStore};
    use crate::test_support::{new_service, new_vendor, FailingStore};
    use crate::vendor::repository::DocumentVendorRepository;
    use serde_json::json;

    type Catalog = CatalogService<DocumentServiceRepository, DocumentVendorRepository>;

    fn catalog_over(store: Arc<dyn DocumentStore>) -> (Catalog, Arc<DocumentVendorRepository>) {
        let vendors = Arc::new(DocumentVendorRepository::new(store.clone()));
        let services = Arc::new(DocumentServiceRepository::new(store));
        (CatalogService::new(services, vendors.clone()), vendors)
    }

    fn catalog() -> (Catalog, Arc<DocumentVendorRepository>) {
        catalog_over(JsonDocumentStore::in_memory())
    }

    #[tokio::test]
    async fn details_include_vendor_when_present() -> Result<(), anyhow::Error> {
        let (catalog, vendors) = catalog();
        let svc = catalog.create_service(new_service("Hall", "venue", 100.0, "v1", &[])).await?;
        vendors.create(new_vendor(Some("v1"), "Acme")).await?;

        let details = catalog.get_service_details(&svc.id).await?.unwrap();
        assert_eq!(details.vendor_details.as_ref().unwrap().name, "Acme");

        let value = serde_json::to_value(&details)?;
        assert_eq!(value["vendorDetails"]["name"], "Acme");
        assert_eq!(value["name"]["en"], "Hall");
        assert_eq!(value["id"], json!(svc.id));
        Ok(())
    }

    #[tokio::test]
    async fn details_degrade_when_vendor_missing_or_deleted() -> Result<(), anyhow::Error> {
        let (catalog, vendors) = catalog();
        let svc = catalog.create_service(new_service("Hall", "venue", 100.0, "v9", &[])).await?;

        let details = catalog.get_service_details(&svc.id).await?.unwrap();
        assert!(details.vendor_details.is_none());
        assert!(serde_json::to_value(&details)?.get("vendorDetails").is_none());

        vendors.create(new_vendor(Some("v9"), "Gone")).await?;
        vendors.soft_delete("v9").await?;
        let details = catalog.get_service_details(&svc.id).await?.unwrap();
        assert!(details.vendor_details.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn create_generates_or_preserves_ids() -> Result<(), anyhow::Error> {
        let (catalog, _) = catalog();
        let a = catalog.create_service(new_service("A", "venue", 1.0, "v1", &[])).await?;
        let b = catalog.create_service(new_service("B", "venue", 1.0, "v1", &[])).await?;
        assert_ne!(a.id, b.id);
        assert!(uuid::Uuid::parse_str(&a.id).is_ok());

        let mut explicit = new_service("C", "venue", 1.0, "v1", &[]);
        explicit.id = Some("svc-explicit".into());
        let c = catalog.create_service(explicit).await?;
        assert_eq!(c.id, "svc-explicit");

        let mut blank = new_service("D", "venue", 1.0, "v1", &[]);
        blank.id = Some("   ".into());
        let d = catalog.create_service(blank).await?;
        assert!(uuid::Uuid::parse_str(&d.id).is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_quiet_for_unknown_ids() -> Result<(), anyhow::Error> {
        let (catalog, _) = catalog();
        assert!(!catalog.delete_service("nope").await?);
        let s = catalog.create_service(new_service("A", "venue", 1.0, "v1", &[])).await?;
        assert!(catalog.delete_service(&s.id).await?);
        assert!(!catalog.delete_service(&s.id).await?);
        assert!(catalog.get_service_details(&s.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn filters_price_range_and_tags() -> Result<(), anyhow::Error> {
        let (catalog, _) = catalog();
        let cheap = catalog.create_service(new_service("Cheap", "venue", 50.0, "v1", &["indoor"])).await?;
        let mid = catalog.create_service(new_service("Mid", "venue", 100.0, "v1", &["outdoor", "garden"])).await?;
        let dear = catalog.create_service(new_service("Dear", "venue", 150.0, "v1", &["outdoor"])).await?;
        let deleted = catalog.create_service(new_service("Deleted", "venue", 100.0, "v1", &["outdoor"])).await?;
        catalog.delete_service(&deleted.id).await?;

        let ids = |page: Page<Service>| page.items.into_iter().map(|s| s.id).collect::<Vec<_>>();

        let in_range = catalog
            .filter_services(&params_from_body(json!({"min_price": 50, "max_price": 100}))?)
            .await?;
        assert_eq!(in_range.meta.total_items, 2);
        assert_eq!(ids(in_range), vec![cheap.id.clone(), mid.id.clone()]);

        let outdoor = catalog.filter_services(&params_from_body(json!({"tags": ["outdoor"]}))?).await?;
        assert_eq!(ids(outdoor), vec![mid.id.clone(), dear.id.clone()]);

        let bounded = catalog.filter_services(&params_from_body(json!({"min_price": 120}))?).await?;
        assert_eq!(ids(bounded), vec![dear.id.clone()]);
        Ok(())
    }

    #[tokio::test]
    async fn consecutive_pages_are_disjoint_and_cover_the_set() -> Result<(), anyhow::Error> {
        let (catalog, _) = catalog();
        for i in 0..7 {
            catalog.create_service(new_service(&format!("S{i}"), "venue", i as f64, "v1", &[])).await?;
        }
        let mut seen = Vec::new();
        for page in 1..=3 {
            let params = params_from_body(json!({"page": page, "pageSize": 3, "sort_by": "base_price"}))?;
            let result = catalog.list_services(&params).await?;
            assert_eq!(result.meta.total_items, 7);
            assert_eq!(result.meta.total_pages, 3);
            seen.extend(result.items.into_iter().map(|s| s.base_price.unwrap()));
        }
        assert_eq!(seen, (0..7).map(|i| i as f64).collect::<Vec<_>>());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_filter_fails_the_list() {
        let (catalog, _) = catalog();
        let params = params_from_body(json!({"min_price": "free"})).unwrap();
        let err = catalog.list_services(&params).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn store_failures_are_distinguishable_from_not_found() {
        let (catalog, _) = catalog_over(Arc::new(FailingStore));
        let err = catalog.get_service_details("x").await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        let err = catalog.list_services(&Params::new()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
    }
}
