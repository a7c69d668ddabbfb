//! Query model understood by every [`DocumentStore`](super::document_store::DocumentStore).
//!
//! A [`Query`] is a conjunction of predicates over document fields. Field
//! names may be dotted paths (`contact.email`) to reach embedded documents.

use std::cmp::Ordering;

use serde_json::{Map, Value};

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals the value; an array field matches when it contains it.
    Eq { field: String, value: Value },
    /// Inclusive range on numbers or strings. Either bound may be absent.
    Range { field: String, gte: Option<Value>, lte: Option<Value> },
    /// Scalar field is one of `values`, or array field intersects `values`.
    AnyOf { field: String, values: Vec<Value> },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    predicates: Vec<Predicate>,
}

impl Query {
    pub fn new() -> Self { Self::default() }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate::Eq { field: field.into(), value: value.into() });
        self
    }

    pub fn range(mut self, field: impl Into<String>, gte: Option<Value>, lte: Option<Value>) -> Self {
        self.predicates.push(Predicate::Range { field: field.into(), gte, lte });
        self
    }

    pub fn any_of(mut self, field: impl Into<String>, values: Vec<Value>) -> Self {
        self.predicates.push(Predicate::AnyOf { field: field.into(), values });
        self
    }

    pub fn predicates(&self) -> &[Predicate] { &self.predicates }

    pub fn matches(&self, doc: &Document) -> bool {
        self.predicates.iter().all(|p| p.matches(doc))
    }
}

impl Predicate {
    fn matches(&self, doc: &Document) -> bool {
        match self {
            Predicate::Eq { field, value } => match lookup(doc, field) {
                Some(Value::Array(items)) if !value.is_array() => items.contains(value),
                Some(found) => found == value,
                None => value.is_null(),
            },
            Predicate::Range { field, gte, lte } => {
                let Some(found) = lookup(doc, field) else { return false };
                let lower_ok = gte.as_ref().map_or(true, |b| {
                    matches!(compare_scalar(found, b), Some(Ordering::Greater | Ordering::Equal))
                });
                let upper_ok = lte.as_ref().map_or(true, |b| {
                    matches!(compare_scalar(found, b), Some(Ordering::Less | Ordering::Equal))
                });
                lower_ok && upper_ok
            }
            Predicate::AnyOf { field, values } => match lookup(doc, field) {
                Some(Value::Array(items)) => items.iter().any(|i| values.contains(i)),
                Some(found) => values.contains(found),
                None => false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self { field: field.into(), direction }
    }

    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ord = compare_values(lookup(a, &self.field), lookup(b, &self.field));
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Options applied after filtering: sort, then skip, then limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    pub skip: u64,
    pub limit: Option<u64>,
    pub sort: Option<Sort>,
}

/// Resolve a dotted path inside a document.
pub fn lookup<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

fn compare_scalar(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn type_rank(v: Option<&Value>) -> u8 {
    match v {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// Total order used for sorting: missing/null < bool < number < string <
/// array < object; values of the same type compare naturally.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (ra, rb) = (type_rank(a), type_rank(b));
    if ra != rb {
        return ra.cmp(&rb);
    }
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Array(x)), Some(Value::Array(y))) => {
            for (l, r) in x.iter().zip(y.iter()) {
                let ord = compare_values(Some(l), Some(r));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        _ => Ordering::Equal,
    }
}
