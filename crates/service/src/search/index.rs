use async_trait::async_trait;
use models::service::Service;

use crate::errors::ServiceError;

/// Ranked free-text lookup. Implementations return services ordered by
/// relevance, best first.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn search(&self, text: &str, limit: usize) -> Result<Vec<Service>, ServiceError>;
}

/// Index that holds nothing and matches nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSearchIndex;

#[async_trait]
impl SearchIndex for NoopSearchIndex {
    async fn search(&self, _text: &str, _limit: usize) -> Result<Vec<Service>, ServiceError> {
        Ok(Vec::new())
    }
}
