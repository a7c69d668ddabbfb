//! Translation of service filter parameters into a store [`Query`].

use serde_json::Value;
use tracing::debug;

use crate::errors::ServiceError;
use crate::listing::{get_f64, get_str, get_str_list, is_list_option_key, Params};
use crate::storage::query::Query;

const MIN_PRICE_KEYS: &[&str] = &["min_price", "minPrice"];
const MAX_PRICE_KEYS: &[&str] = &["max_price", "maxPrice"];
const KNOWN_KEYS: &[&str] = &["category", "vendor_id", "min_price", "minPrice", "max_price", "maxPrice", "tags"];

/// Recognised service filters. All present filters are ANDed and the
/// `is_deleted == false` predicate is always added by [`ServiceFilter::to_query`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFilter {
    pub category: Option<String>,
    pub vendor_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub tags: Option<Vec<String>>,
}

impl ServiceFilter {
    pub fn from_params(params: &Params) -> Result<Self, ServiceError> {
        for key in params.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) && !is_list_option_key(key) {
                debug!(%key, "ignoring unrecognised service filter");
            }
        }

        let filter = Self {
            category: get_str(params, "category")?,
            vendor_id: get_str(params, "vendor_id")?,
            min_price: get_f64(params, MIN_PRICE_KEYS)?,
            max_price: get_f64(params, MAX_PRICE_KEYS)?,
            tags: get_str_list(params, "tags")?,
        };
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Err(ServiceError::Validation(format!(
                    "min_price ({min}) must not exceed max_price ({max})"
                )));
            }
        }
        Ok(filter)
    }

    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        if let Some(category) = &self.category {
            query = query.eq("category", category.as_str());
        }
        if let Some(vendor_id) = &self.vendor_id {
            query = query.eq("vendor_id", vendor_id.as_str());
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            query = query.range("base_price", self.min_price.map(Value::from), self.max_price.map(Value::from));
        }
        if let Some(tags) = &self.tags {
            query = query.any_of("tags", tags.iter().map(|t| Value::from(t.as_str())).collect());
        }
        query.eq("is_deleted", false)
    }
}
