use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{Document, Bson, oid::ObjectId, doc};
use mongodb::{
    Client, Collection as MongoCollection,
    error::{Error as MongoError, ErrorKind},
    options::{ClientOptions, FindOptions},
};
use tracing::info;
use docbridge_core::{
    backend::{StoreBackend, StoreBackendBuilder, StoredDocument},
    config::StoreConfig,
    error::{StoreError, StoreResult},
    query::{Query, QueryVisitor},
};

use crate::query::MongoQueryTranslator;

const ID_FIELD: &str = "_id";


#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    /// Returns a builder for the store described by `config`.
    pub fn from_config(config: &StoreConfig) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::from_config(config)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    fn prepare_document(&self, id: &str, mut fields: Document) -> Document {
        fields.remove(ID_FIELD);
        fields.insert(ID_FIELD, id);
        fields
    }

    fn restore_document(&self, mut document: Document) -> StoreResult<StoredDocument> {
        let id = match document.remove(ID_FIELD) {
            Some(Bson::String(id)) => id,
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(other) => other.to_string(),
            None => return Err(StoreError::InvalidDocument("Expected document with an _id".into())),
        };

        Ok(StoredDocument::new(id, document))
    }

    /// Matches documents stored under `id`, whether it was written as a string or,
    /// by another client, as an `ObjectId`.
    fn id_filter(id: &str) -> Document {
        match ObjectId::parse_str(id) {
            Ok(oid) => doc! { ID_FIELD: { "$in": [id, oid] } },
            Err(_) => doc! { ID_FIELD: id },
        }
    }

    async fn shutdown(self) -> StoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

/// Maps driver errors onto store errors, separating transient from permanent faults.
fn remote_error(err: MongoError) -> StoreError {
    let transient = err.contains_label("RetryableWriteError")
        || err.contains_label("TransientTransactionError")
        || matches!(
            *err.kind,
            ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } | ErrorKind::ConnectionPoolCleared { .. }
        );

    if transient {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Backend(err.to_string())
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn get_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        self.get_collection(collection)
            .find(doc! {})
            .await
            .map_err(remote_error)?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(remote_error)?
            .into_iter()
            .map(|doc| self.restore_document(doc))
            .collect()
    }

    async fn query_documents(&self, query: Query, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let mut options = FindOptions::default();

        if let Some(limit) = query.limit {
            options.limit = Some(limit as i64);
        }

        self.get_collection(collection)
            .find(
                if let Some(expr) = &query.filter {
                    MongoQueryTranslator.visit_expr(expr)?
                } else {
                    doc! {}
                },
            )
            .with_options(options)
            .await
            .map_err(remote_error)?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(remote_error)?
            .into_iter()
            .map(|doc| self.restore_document(doc))
            .collect()
    }

    async fn get_document(&self, id: &str, collection: &str) -> StoreResult<Option<StoredDocument>> {
        self.get_collection(collection)
            .find_one(Self::id_filter(id))
            .await
            .map_err(remote_error)?
            .map(|doc| self.restore_document(doc))
            .transpose()
    }

    async fn set_document(&self, id: &str, fields: Document, collection: &str) -> StoreResult<()> {
        self.get_collection(collection)
            .replace_one(doc! { ID_FIELD: id }, self.prepare_document(id, fields))
            .upsert(true)
            .await
            .map_err(remote_error)?;

        Ok(())
    }

    async fn add_document(&self, fields: Document, collection: &str) -> StoreResult<String> {
        let id = ObjectId::new().to_hex();

        self.get_collection(collection)
            .insert_one(self.prepare_document(&id, fields))
            .await
            .map_err(remote_error)?;

        Ok(id)
    }

    async fn merge_document(&self, id: &str, mut fields: Document, collection: &str) -> StoreResult<()> {
        fields.remove(ID_FIELD);

        let result = self.get_collection(collection)
            .update_one(Self::id_filter(id), doc! { "$set": fields })
            .await
            .map_err(remote_error)?;

        if result.matched_count == 0 {
            return Err(StoreError::DocumentNotFound(id.to_string(), collection.to_string()));
        }

        Ok(())
    }

    async fn delete_document(&self, id: &str, collection: &str) -> StoreResult<()> {
        let result = self.get_collection(collection)
            .delete_one(Self::id_filter(id))
            .await
            .map_err(remote_error)?;

        if result.deleted_count == 0 {
            return Err(StoreError::DocumentNotFound(id.to_string(), collection.to_string()));
        }

        Ok(())
    }

    async fn shutdown(self) -> StoreResult<()> {
        self.shutdown().await
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.uri, &config.database)
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        let client = Client::with_options(
            ClientOptions::parse(&self.dsn)
                .await
                .map_err(|e| StoreError::Initialization(e.to_string()))?,
        )
        .map_err(|e| StoreError::Initialization(e.to_string()))?;

        info!(database = %self.database, "connected MongoDB backend");

        Ok(MongoDbStore::new(client, self.database))
    }
}
