use std::sync::Arc;

use models::service::Service;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::search::index::SearchIndex;

pub struct SearchService<I: SearchIndex> {
    index: Arc<I>,
}

impl<I: SearchIndex> SearchService<I> {
    pub fn new(index: Arc<I>) -> Self { Self { index } }

    /// Search services by free text. An absent or blank query yields an
    /// empty result instead of an error.
    #[instrument(skip(self))]
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<Service>, ServiceError> {
        let Some(text) = query.map(str::trim).filter(|t| !t.is_empty()) else {
            debug!("empty search query");
            return Ok(Vec::new());
        };
        let hits = self.index.search(text, DEFAULT_PAGE_SIZE as usize).await?;
        info!(count = hits.len(), "search_services");
        Ok(hits)
    }
}
