//! Storage backend abstraction for the adapter.
//!
//! The [`StoreBackend`] trait is the complete set of capabilities the adapter needs
//! from a remote document store:
//!
//! - get every document in a collection
//! - query by conjunctive equality filters with an optional limit
//! - get a document by identifier
//! - create a document under a caller-chosen identifier
//! - create a document under a store-generated identifier
//! - partially update a document by identifier
//! - delete a document by identifier
//!
//! Backends speak store-native field names and [`bson::Document`]s. Translation to
//! and from the canonical record model is the adapter's job, not the backend's.
//!
//! # Example
//!
//! ```ignore
//! use docbridge::backend::StoreBackend;
//! use bson::doc;
//!
//! let id = backend.add_document(doc! { "title": "Intro" }, "courses").await?;
//! let stored = backend.get_document(&id, "courses").await?;
//! assert!(stored.is_some());
//! ```

use async_trait::async_trait;
use bson::Document;
use std::{fmt::Debug, sync::Arc};

use crate::{error::StoreResult, query::Query};

/// A document as held by the store: its native identifier and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// The store's native document identifier.
    pub id: String,
    /// The store-native fields, without the identifier.
    pub fields: Document,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, fields: Document) -> Self {
        Self { id: id.into(), fields }
    }
}

/// Abstract interface for remote document stores.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the adapter issues independent calls from
/// any task without coordinating them.
///
/// # Error Handling
///
/// Remote failures are returned as [`StoreError`](crate::error::StoreError). Backends
/// should report transient failures as `Unavailable` and everything else as
/// `Backend`. Backends never retry.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Returns every document in a collection. A collection that was never written
    /// to is empty, not an error.
    async fn get_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>>;

    /// Returns the documents matching the query's filter, up to its limit.
    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> StoreResult<Vec<StoredDocument>>;

    /// Returns the document with the given identifier, or `None` if there is none.
    async fn get_document(
        &self,
        id: &str,
        collection: &str,
    ) -> StoreResult<Option<StoredDocument>>;

    /// Writes a document under the given identifier, replacing any document
    /// already stored there.
    async fn set_document(
        &self,
        id: &str,
        fields: Document,
        collection: &str,
    ) -> StoreResult<()>;

    /// Writes a document under a fresh store-generated identifier and returns it.
    async fn add_document(&self, fields: Document, collection: &str) -> StoreResult<String>;

    /// Merges `fields` into an existing document. Fields not named in `fields`
    /// are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `DocumentNotFound` if no document has the identifier.
    async fn merge_document(
        &self,
        id: &str,
        fields: Document,
        collection: &str,
    ) -> StoreResult<()>;

    /// Deletes the document with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns `DocumentNotFound` if no document has the identifier.
    async fn delete_document(&self, id: &str, collection: &str) -> StoreResult<()>;

    /// Releases the backend's resources. The default implementation is a no-op.
    async fn shutdown(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn get_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        (*self).get_all(collection).await
    }

    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> StoreResult<Vec<StoredDocument>> {
        (*self)
            .query_documents(query, collection)
            .await
    }

    async fn get_document(
        &self,
        id: &str,
        collection: &str,
    ) -> StoreResult<Option<StoredDocument>> {
        (*self)
            .get_document(id, collection)
            .await
    }

    async fn set_document(
        &self,
        id: &str,
        fields: Document,
        collection: &str,
    ) -> StoreResult<()> {
        (*self)
            .set_document(id, fields, collection)
            .await
    }

    async fn add_document(&self, fields: Document, collection: &str) -> StoreResult<String> {
        (*self)
            .add_document(fields, collection)
            .await
    }

    async fn merge_document(
        &self,
        id: &str,
        fields: Document,
        collection: &str,
    ) -> StoreResult<()> {
        (*self)
            .merge_document(id, fields, collection)
            .await
    }

    async fn delete_document(&self, id: &str, collection: &str) -> StoreResult<()> {
        (*self)
            .delete_document(id, collection)
            .await
    }
}

#[async_trait]
impl<B> StoreBackend for Arc<B>
where
    B: StoreBackend,
{
    async fn get_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        (**self).get_all(collection).await
    }

    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> StoreResult<Vec<StoredDocument>> {
        (**self)
            .query_documents(query, collection)
            .await
    }

    async fn get_document(
        &self,
        id: &str,
        collection: &str,
    ) -> StoreResult<Option<StoredDocument>> {
        (**self)
            .get_document(id, collection)
            .await
    }

    async fn set_document(
        &self,
        id: &str,
        fields: Document,
        collection: &str,
    ) -> StoreResult<()> {
        (**self)
            .set_document(id, fields, collection)
            .await
    }

    async fn add_document(&self, fields: Document, collection: &str) -> StoreResult<String> {
        (**self)
            .add_document(fields, collection)
            .await
    }

    async fn merge_document(
        &self,
        id: &str,
        fields: Document,
        collection: &str,
    ) -> StoreResult<()> {
        (**self)
            .merge_document(id, fields, collection)
            .await
    }

    async fn delete_document(&self, id: &str, collection: &str) -> StoreResult<()> {
        (**self)
            .delete_document(id, collection)
            .await
    }
}

/// Factory trait for constructing backends, typically from connection settings.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
