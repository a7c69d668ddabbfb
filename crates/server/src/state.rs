use std::sync::Arc;

use service::catalog::{CatalogService, DocumentServiceRepository};
use service::search::{NoopSearchIndex, SearchService};
use service::storage::DocumentStore;
use service::vendor::{DocumentVendorRepository, VendorService};

pub type Catalog = CatalogService<DocumentServiceRepository, DocumentVendorRepository>;
pub type Vendors = VendorService<DocumentVendorRepository>;
pub type Search = SearchService<NoopSearchIndex>;

/// Shared handler state. Every service holds repositories built over the
/// same store handle.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub vendors: Arc<Vendors>,
    pub search: Arc<Search>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let vendor_repo = Arc::new(DocumentVendorRepository::new(Arc::clone(&store)));
        let service_repo = Arc::new(DocumentServiceRepository::new(store));
        Self {
            catalog: Arc::new(CatalogService::new(service_repo, Arc::clone(&vendor_repo))),
            vendors: Arc::new(VendorService::new(vendor_repo)),
            search: Arc::new(SearchService::new(Arc::new(NoopSearchIndex))),
        }
    }
}
