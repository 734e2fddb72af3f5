//! The data-access adapter: canonical CRUD over a store-native backend.
//!
//! [`DataAdapter`] presents callers with snake_case [`Record`]s and translates every
//! request into the backend's camelCase, BSON-typed representation. Each returned
//! record carries the store's identifier as `id` and has all timestamps rendered as
//! ISO-8601 strings.
//!
//! # Resolving a single record
//!
//! `find_one`, `update` and `delete` locate their target the same way:
//!
//! 1. If the collection declares an identity field and the condition gives it a
//!    non-empty value, the document is fetched directly by that identifier.
//! 2. If that finds nothing, or step 1 does not apply, the backend is queried for one
//!    document matching the condition's first entry.
//!
//! Step 2 also finds records written by other clients under generated keys.
//!
//! # Example
//!
//! ```ignore
//! use docbridge::prelude::*;
//! use serde_json::json;
//!
//! let adapter = DataAdapter::new(InMemoryStore::new());
//!
//! let course = adapter
//!     .insert(Collection::Courses, into_record(json!({ "course_id": "c1", "title": "Intro" }))?)
//!     .await?;
//! assert_eq!(course["id"], "c1");
//!
//! let found = adapter
//!     .find_one(Collection::Courses, &Condition::new().eq("course_id", "c1"))
//!     .await?;
//! assert!(found.is_some());
//! ```

use bson::{Bson, DateTime};
use serde_json::Value;
use tracing::debug;

use crate::{
    backend::{StoreBackend, StoredDocument},
    collection::Collection,
    condition::Condition,
    error::{StoreError, StoreResult},
    naming::{FieldAlias, native_field_name, to_canonical, to_store_native},
    query::{Expr, Filter, Query},
    value::{Record, to_native_value},
};

/// Canonical CRUD operations over a document store backend.
///
/// The adapter holds no state besides the backend, so it can be shared freely
/// across tasks. Absence is never an error: `find_one` and `update` return
/// `Ok(None)`, `delete` returns `Ok(false)`. Remote failures are passed through
/// unchanged and never retried.
#[derive(Debug)]
pub struct DataAdapter<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> DataAdapter<B> {
    /// Creates an adapter over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns every record in the collection.
    pub async fn read(&self, collection: Collection) -> StoreResult<Vec<Record>> {
        debug!(%collection, "reading collection");

        Ok(self
            .backend
            .get_all(collection.name())
            .await?
            .into_iter()
            .map(canonical_record)
            .collect())
    }

    /// Returns every record matching all entries of `condition`.
    ///
    /// An empty condition returns the whole collection.
    pub async fn find(
        &self,
        collection: Collection,
        condition: &Condition,
    ) -> StoreResult<Vec<Record>> {
        if condition.is_empty() {
            return self.read(collection).await;
        }

        debug!(%collection, fields = condition.len(), "finding records");

        let query = Query::builder()
            .filter(native_filter(condition)?)
            .build();

        Ok(self
            .backend
            .query_documents(query, collection.name())
            .await?
            .into_iter()
            .map(canonical_record)
            .collect())
    }

    /// Returns the single record identified by `condition`, or `None`.
    ///
    /// Conditions without the identity field are resolved on their first entry
    /// only, so callers should pass a single-field condition in that case.
    pub async fn find_one(
        &self,
        collection: Collection,
        condition: &Condition,
    ) -> StoreResult<Option<Record>> {
        Ok(self
            .resolve(collection, condition)
            .await?
            .map(canonical_record))
    }

    /// Creates a record and returns it as stored.
    ///
    /// `created_at` is set to the current time. When the record holds a non-empty
    /// value for the collection's identity field, that value becomes the document
    /// identifier and any document already stored under it is replaced. Otherwise the
    /// store generates the identifier.
    pub async fn insert(&self, collection: Collection, record: Record) -> StoreResult<Record> {
        let name = collection.name();
        let identity = collection
            .identity_field()
            .and_then(|field| record.get(field))
            .and_then(identity_value);

        let mut fields = to_store_native(record)?;
        fields.insert(FieldAlias::CreatedAt.native(), Bson::DateTime(DateTime::now()));

        let id = match identity {
            Some(id) => {
                debug!(%collection, %id, "inserting record under identity key");
                self.backend
                    .set_document(&id, fields, name)
                    .await?;
                id
            }
            None => {
                let id = self.backend
                    .add_document(fields, name)
                    .await?;
                debug!(%collection, %id, "inserted record under generated key");
                id
            }
        };

        self.backend
            .get_document(&id, name)
            .await?
            .map(canonical_record)
            .ok_or_else(|| StoreError::DocumentNotFound(id, name.to_string()))
    }

    /// Merges `updates` into the record identified by `condition`.
    ///
    /// `updated_at` is set to the current time; fields absent from `updates` are left
    /// as they are. Returns the record after the update, or `None` when nothing
    /// matches the condition or the match disappears before it is written.
    pub async fn update(
        &self,
        collection: Collection,
        condition: &Condition,
        updates: Record,
    ) -> StoreResult<Option<Record>> {
        let name = collection.name();
        let Some(target) = self.resolve(collection, condition).await? else {
            debug!(%collection, "no record to update");
            return Ok(None);
        };

        let mut fields = to_store_native(updates)?;
        fields.insert(FieldAlias::UpdatedAt.native(), Bson::DateTime(DateTime::now()));

        debug!(%collection, id = %target.id, fields = fields.len(), "updating record");

        match self.backend.merge_document(&target.id, fields, name).await {
            Ok(()) => {}
            Err(StoreError::DocumentNotFound(..)) => {
                debug!(%collection, id = %target.id, "record removed before update");
                return Ok(None);
            }
            Err(err) => return Err(err),
        }

        Ok(self
            .backend
            .get_document(&target.id, name)
            .await?
            .map(canonical_record))
    }

    /// Deletes the record identified by `condition`.
    ///
    /// Returns `true` if a record was deleted and `false` if nothing matched,
    /// including when the matched record is removed by another caller first.
    pub async fn delete(&self, collection: Collection, condition: &Condition) -> StoreResult<bool> {
        let Some(target) = self.resolve(collection, condition).await? else {
            debug!(%collection, "no record to delete");
            return Ok(false);
        };

        debug!(%collection, id = %target.id, "deleting record");

        match self.backend.delete_document(&target.id, collection.name()).await {
            Ok(()) => Ok(true),
            Err(StoreError::DocumentNotFound(..)) => {
                debug!(%collection, id = %target.id, "record removed before delete");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Releases the backend's resources.
    pub async fn shutdown(self) -> StoreResult<()> {
        self.backend.shutdown().await
    }

    async fn resolve(
        &self,
        collection: Collection,
        condition: &Condition,
    ) -> StoreResult<Option<StoredDocument>> {
        let name = collection.name();

        if let Some(id) = collection
            .identity_field()
            .and_then(|field| condition.get(field))
            .and_then(identity_value)
        {
            if let Some(document) = self.backend.get_document(&id, name).await? {
                debug!(%collection, %id, "resolved record by identity key");
                return Ok(Some(document));
            }

            debug!(%collection, %id, "identity key missing from store; falling back to query");
        }

        let Some((field, value)) = condition.first() else {
            return Ok(None);
        };

        let query = Query::builder()
            .filter(Filter::eq(native_field_name(field), to_native_value(value.clone())?))
            .limit(1)
            .build();

        Ok(self
            .backend
            .query_documents(query, name)
            .await?
            .into_iter()
            .next())
    }
}

/// Builds a conjunctive store-native filter from a canonical condition.
fn native_filter(condition: &Condition) -> StoreResult<Expr> {
    Ok(Filter::and(
        condition
            .iter()
            .map(|(field, value)| {
                to_native_value(value.clone())
                    .map(|value| Filter::eq(native_field_name(field), value))
            })
            .collect::<StoreResult<Vec<_>>>()?,
    ))
}

/// Interprets an identity-field value as a native document identifier.
fn identity_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn canonical_record(document: StoredDocument) -> Record {
    let mut record = to_canonical(document.fields);
    record.insert("id".to_string(), Value::String(document.id));
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_values_must_be_non_empty_scalars() {
        assert_eq!(identity_value(&json!("c1")), Some("c1".to_string()));
        assert_eq!(identity_value(&json!(1042)), Some("1042".to_string()));
        assert_eq!(identity_value(&json!("")), None);
        assert_eq!(identity_value(&json!(null)), None);
        assert_eq!(identity_value(&json!({ "nested": "c1" })), None);
    }

    #[test]
    fn filters_use_native_names() {
        let condition = Condition::new()
            .eq("course_id", "c1")
            .eq("title", "Intro");

        assert_eq!(
            native_filter(&condition).unwrap(),
            Filter::and([
                Filter::eq("courseId", Bson::String("c1".into())),
                Filter::eq("title", Bson::String("Intro".into())),
            ]),
        );
    }

    #[test]
    fn store_identifier_is_merged_as_id() {
        let record = canonical_record(StoredDocument::new(
            "c1",
            bson::doc! { "courseId": "c1", "id": "stale" },
        ));

        assert_eq!(Value::Object(record), json!({ "id": "c1", "course_id": "c1" }));
    }
}
