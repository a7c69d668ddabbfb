use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::document_store::{DocumentStore, NATIVE_ID_FIELD};
use crate::storage::query::{Document, FindOptions, Query};

/// JSON file-backed document store.
///
/// Each collection is an ordered list of documents persisted as
/// `<data_dir>/<collection>.json`; insertion order is the natural (unsorted)
/// order. Writes hold the lock until the file is replaced so the file always
/// reflects the in-memory state. Without a data directory nothing touches
/// the filesystem.
pub struct JsonDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    data_dir: Option<PathBuf>,
    closed: AtomicBool,
}

fn store_err(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::Store(e.to_string())
}

fn validate_collection(name: &str) -> Result<(), ServiceError> {
    let ok = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok { Ok(()) } else { Err(ServiceError::Store(format!("invalid collection name: {name:?}"))) }
}

impl JsonDocumentStore {
    /// Open (or create) a store rooted at `dir`, loading every `*.json`
    /// collection file found there.
    pub async fn open<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, ServiceError> {
        let data_dir = dir.into();
        fs::create_dir_all(&data_dir).await.map_err(store_err)?;

        let mut collections = HashMap::new();
        let mut entries = fs::read_dir(&data_dir).await.map_err(store_err)?;
        while let Some(entry) = entries.next_entry().await.map_err(store_err)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            let bytes = fs::read(&path).await.map_err(store_err)?;
            let docs: Vec<Document> = serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Store(format!("corrupt collection file {}: {e}", path.display()))
            })?;
            debug!(collection = %name, count = docs.len(), "collection loaded");
            collections.insert(name.to_string(), docs);
        }

        info!(data_dir = %data_dir.display(), collections = collections.len(), "document store opened");
        Ok(Arc::new(Self {
            collections: RwLock::new(collections),
            data_dir: Some(data_dir),
            closed: AtomicBool::new(false),
        }))
    }

    /// Purely in-memory store, used by tests and `store.in_memory = true`.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self {
            collections: RwLock::new(HashMap::new()),
            data_dir: None,
            closed: AtomicBool::new(false),
        })
    }

    fn ensure_open(&self) -> Result<(), ServiceError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ServiceError::Store("document store is closed".into()));
        }
        Ok(())
    }

    async fn persist(&self, collection: &str, docs: &[Document]) -> Result<(), ServiceError> {
        let Some(dir) = &self.data_dir else { return Ok(()) };
        let data = serde_json::to_vec(docs).map_err(store_err)?;
        let path = dir.join(format!("{collection}.json"));
        let tmp = dir.join(format!("{collection}.json.tmp"));
        fs::write(&tmp, data).await.map_err(store_err)?;
        fs::rename(&tmp, &path).await.map_err(store_err)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonDocumentStore {
    async fn insert_one(&self, collection: &str, mut doc: Document) -> Result<(), ServiceError> {
        self.ensure_open()?;
        validate_collection(collection)?;
        doc.insert(NATIVE_ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));

        let mut map = self.collections.write().await;
        let docs = map.entry(collection.to_string()).or_default();
        docs.push(doc);
        if let Err(e) = self.persist(collection, docs).await {
            docs.pop();
            return Err(e);
        }
        Ok(())
    }

    async fn find_one(&self, collection: &str, query: &Query) -> Result<Option<Document>, ServiceError> {
        self.ensure_open()?;
        let map = self.collections.read().await;
        Ok(map
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| query.matches(d)))
            .cloned())
    }

    async fn find(&self, collection: &str, query: &Query, options: &FindOptions) -> Result<Vec<Document>, ServiceError> {
        self.ensure_open()?;
        let map = self.collections.read().await;
        let Some(docs) = map.get(collection) else { return Ok(Vec::new()) };

        let mut matched: Vec<&Document> = docs.iter().filter(|d| query.matches(d)).collect();
        if let Some(sort) = &options.sort {
            // stable: ties keep insertion order
            matched.sort_by(|a, b| sort.compare(a, b));
        }
        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let limit = options
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn count(&self, collection: &str, query: &Query) -> Result<u64, ServiceError> {
        self.ensure_open()?;
        let map = self.collections.read().await;
        let n = map
            .get(collection)
            .map_or(0, |docs| docs.iter().filter(|d| query.matches(d)).count());
        Ok(n as u64)
    }

    async fn update_one(&self, collection: &str, query: &Query, set: Document) -> Result<Option<Document>, ServiceError> {
        self.ensure_open()?;
        let mut map = self.collections.write().await;
        let Some(docs) = map.get_mut(collection) else { return Ok(None) };
        let Some(pos) = docs.iter().position(|d| query.matches(d)) else { return Ok(None) };

        let previous = docs[pos].clone();
        for (key, value) in set {
            if key == NATIVE_ID_FIELD {
                continue;
            }
            docs[pos].insert(key, value);
        }
        if let Err(e) = self.persist(collection, docs).await {
            docs[pos] = previous;
            return Err(e);
        }
        Ok(Some(docs[pos].clone()))
    }

    async fn close(&self) -> Result<(), ServiceError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        let map = self.collections.read().await;
        for (name, docs) in map.iter() {
            self.persist(name, docs).await?;
        }
        info!(collections = map.len(), "document store closed");
        Ok(())
    }
}
