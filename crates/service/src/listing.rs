//! Request parameters for list operations.
//!
//! Query strings and JSON bodies are both normalised into a [`Params`] map so
//! that filters, pagination and sort are parsed by one set of rules. String
//! values are accepted wherever a number or boolean is expected, since query
//! strings carry nothing else.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::errors::ServiceError;
use crate::pagination::{Pagination, DEFAULT_PAGE_SIZE};
use crate::storage::query::{FindOptions, Sort, SortDirection};

pub type Params = Map<String, Value>;

const PAGE_KEYS: &[&str] = &["page"];
const PAGE_SIZE_KEYS: &[&str] = &["pageSize", "page_size"];
const SORT_BY_KEY: &str = "sort_by";
const SORT_ORDER_KEY: &str = "sort_order";

pub fn params_from_query(query: HashMap<String, String>) -> Params {
    query.into_iter().map(|(k, v)| (k, Value::String(v))).collect()
}

/// Accept a JSON object (or `null`, meaning no parameters).
pub fn params_from_body(body: Value) -> Result<Params, ServiceError> {
    match body {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Params::new()),
        other => Err(ServiceError::Validation(format!(
            "filter body must be a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

/// Keys consumed by [`ListOptions`] rather than by entity filters.
pub fn is_list_option_key(key: &str) -> bool {
    PAGE_KEYS.contains(&key)
        || PAGE_SIZE_KEYS.contains(&key)
        || key == SORT_BY_KEY
        || key == SORT_ORDER_KEY
}

/// Pagination and sort for a list request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub pagination: Pagination,
    pub sort: Option<Sort>,
}

impl ListOptions {
    pub fn new(pagination: Pagination, sort: Option<Sort>) -> Self {
        Self { pagination: pagination.normalize(), sort }
    }

    pub fn from_params(params: &Params) -> Result<Self, ServiceError> {
        let page = get_positive_u32(params, PAGE_KEYS)?.unwrap_or(1);
        let page_size = get_positive_u32(params, PAGE_SIZE_KEYS)?.unwrap_or(DEFAULT_PAGE_SIZE);
        let sort = parse_sort(params)?;
        Ok(Self::new(Pagination { page, page_size }, sort))
    }

    pub fn find_options(&self) -> FindOptions {
        FindOptions {
            skip: self.pagination.skip(),
            limit: Some(self.pagination.limit()),
            sort: self.sort.clone(),
        }
    }
}

fn parse_sort(params: &Params) -> Result<Option<Sort>, ServiceError> {
    let Some(field) = get_str(params, SORT_BY_KEY)? else { return Ok(None) };
    let valid = !field.starts_with('_')
        && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if !valid {
        return Err(ServiceError::Validation(format!("sort_by: invalid field name {field:?}")));
    }
    let direction = match params.get(SORT_ORDER_KEY) {
        None | Some(Value::Null) => SortDirection::Ascending,
        Some(Value::Number(n)) if n.as_i64() == Some(1) => SortDirection::Ascending,
        Some(Value::Number(n)) if n.as_i64() == Some(-1) => SortDirection::Descending,
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "asc" | "ascending" | "1" => SortDirection::Ascending,
            "desc" | "descending" | "-1" => SortDirection::Descending,
            other => {
                return Err(ServiceError::Validation(format!(
                    "sort_order: expected asc or desc, got {other:?}"
                )))
            }
        },
        Some(other) => {
            return Err(ServiceError::Validation(format!(
                "sort_order: expected asc or desc, got {other}"
            )))
        }
    };
    Ok(Some(Sort::new(field, direction)))
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn first_present<'a>(params: &'a Params, keys: &[&'a str]) -> Option<(&'a str, &'a Value)> {
    keys.iter()
        .find_map(|k| params.get(*k).filter(|v| !v.is_null()).map(|v| (*k, v)))
}

/// Non-empty trimmed string; `null` and blank strings count as absent.
pub(crate) fn get_str(params: &Params, key: &str) -> Result<Option<String>, ServiceError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        Some(other) => Err(ServiceError::Validation(format!(
            "{key}: expected a string, got {}",
            type_name(other)
        ))),
    }
}

/// Finite number from a JSON number or a numeric string.
pub(crate) fn get_f64(params: &Params, keys: &[&str]) -> Result<Option<f64>, ServiceError> {
    let Some((key, value)) = first_present(params, keys) else { return Ok(None) };
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(ServiceError::Validation(format!("{key}: expected a number, got {value}"))),
    }
}

pub(crate) fn get_positive_u32(params: &Params, keys: &[&str]) -> Result<Option<u32>, ServiceError> {
    let Some((key, value)) = first_present(params, keys) else { return Ok(None) };
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n > 0 => Ok(Some(n)),
        _ => Err(ServiceError::Validation(format!("{key}: expected a positive integer, got {value}"))),
    }
}

pub(crate) fn get_bool(params: &Params, key: &str) -> Result<Option<bool>, ServiceError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(ServiceError::Validation(format!("{key}: expected true or false, got {s:?}"))),
        },
        Some(other) => Err(ServiceError::Validation(format!(
            "{key}: expected a boolean, got {}",
            type_name(other)
        ))),
    }
}

/// List of strings from a JSON array, a single string, or a comma-separated
/// query value. Empty lists count as absent.
pub(crate) fn get_str_list(params: &Params, key: &str) -> Result<Option<Vec<String>>, ServiceError> {
    let items: Vec<String> = match params.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.split(',').map(|t| t.trim().to_string()).collect(),
        Some(Value::Array(values)) => values
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.trim().to_string()),
                other => Err(ServiceError::Validation(format!(
                    "{key}: expected strings, got {}",
                    type_name(other)
                ))),
            })
            .collect::<Result<_, _>>()?,
        Some(other) => {
            return Err(ServiceError::Validation(format!(
                "{key}: expected a list of strings, got {}",
                type_name(other)
            )))
        }
    };
    let items: Vec<String> = items.into_iter().filter(|s| !s.is_empty()).collect();
    Ok((!items.is_empty()).then_some(items))
}
