//! In-memory storage implementation of the backend capabilities.
//!
//! Documents are kept as BSON documents in ordered maps keyed by identifier, behind
//! an async-safe read-write lock. Collections spring into existence on first write.

use std::{collections::{BTreeMap, HashMap}, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::Document;
use tracing::debug;
use uuid::Uuid;

use docbridge_core::{
    query::Query,
    error::{StoreError, StoreResult},
    backend::{StoreBackend, StoreBackendBuilder, StoredDocument},
};

use crate::evaluator::DocumentEvaluator;

type CollectionMap = BTreeMap<String, Document>;
type StoreMap = HashMap<String, CollectionMap>;


/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, so clones
/// share the same data. This makes it usable as an injected mock of a remote store:
/// hand one clone to the adapter and keep another to seed or inspect documents.
///
/// Documents are returned in identifier order. Queries scan the whole collection.
///
/// # Example
///
/// ```ignore
/// use docbridge_memory::InMemoryStore;
/// use docbridge::backend::StoreBackend;
/// use bson::doc;
///
/// let store = InMemoryStore::new();
///
/// let id = store.add_document(doc! { "title": "Intro" }, "courses").await?;
/// assert!(store.get_document(&id, "courses").await?.is_some());
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> (document_id -> document)
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Returns the number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.store
            .read()
            .await
            .get(collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }
}

fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn get_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        Ok(
            collection_map
                .iter()
                .map(|(id, doc)| StoredDocument::new(id.clone(), doc.clone()))
                .collect()
        )
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        Ok(
            collection_map
                .iter()
                .filter(|(_, doc)| match &query.filter {
                    Some(filter) => DocumentEvaluator::matches(doc, filter),
                    None => true,
                })
                .take(query.limit.unwrap_or(usize::MAX))
                .map(|(id, doc)| StoredDocument::new(id.clone(), doc.clone()))
                .collect()
        )
    }

    async fn get_document(&self, id: &str, collection: &str) -> StoreResult<Option<StoredDocument>> {
        Ok(
            self.store
                .read()
                .await
                .get(collection)
                .and_then(|col| col.get(id))
                .map(|doc| StoredDocument::new(id, doc.clone()))
        )
    }

    async fn set_document(&self, id: &str, fields: Document, collection: &str) -> StoreResult<()> {
        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);

        Ok(())
    }

    async fn add_document(&self, fields: Document, collection: &str) -> StoreResult<String> {
        let mut store = self.store.write().await;
        let collection_map = store
            .entry(collection.to_string())
            .or_default();

        let mut id = generate_id();
        while collection_map.contains_key(&id) {
            id = generate_id();
        }

        debug!(collection, %id, "generated document id");
        collection_map.insert(id.clone(), fields);

        Ok(id)
    }

    async fn merge_document(&self, id: &str, fields: Document, collection: &str) -> StoreResult<()> {
        let mut store = self.store.write().await;
        let document = store
            .get_mut(collection)
            .and_then(|col| col.get_mut(id))
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string(), collection.to_string()))?;

        for (key, value) in fields {
            document.insert(key, value);
        }

        Ok(())
    }

    async fn delete_document(&self, id: &str, collection: &str) -> StoreResult<()> {
        let mut store = self.store.write().await;

        store
            .get_mut(collection)
            .and_then(|col| col.remove(id))
            .map(|_| ())
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string(), collection.to_string()))
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new, empty [`InMemoryStore`]. This always succeeds.
    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}
