use bson::{Bson, doc};
use docbridge_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::StoreError,
    query::{Filter, Query},
};
use docbridge_memory::InMemoryStore;

#[tokio::test]
async fn set_then_get_returns_the_document() {
    let store = InMemoryStore::builder().build().await.unwrap();

    store
        .set_document("c1", doc! { "courseId": "c1", "title": "Intro" }, "courses")
        .await
        .unwrap();

    let stored = store.get_document("c1", "courses").await.unwrap().unwrap();

    assert_eq!(stored.id, "c1");
    assert_eq!(stored.fields, doc! { "courseId": "c1", "title": "Intro" });
    assert!(store.get_document("c1", "users").await.unwrap().is_none());
}

#[tokio::test]
async fn set_overwrites_and_merge_preserves() {
    let store = InMemoryStore::new();

    store
        .set_document("u1", doc! { "name": "Ada", "role": "student" }, "users")
        .await
        .unwrap();
    store
        .merge_document("u1", doc! { "role": "instructor" }, "users")
        .await
        .unwrap();

    assert_eq!(
        store.get_document("u1", "users").await.unwrap().unwrap().fields,
        doc! { "name": "Ada", "role": "instructor" },
    );

    store
        .set_document("u1", doc! { "name": "Ada Lovelace" }, "users")
        .await
        .unwrap();

    assert_eq!(
        store.get_document("u1", "users").await.unwrap().unwrap().fields,
        doc! { "name": "Ada Lovelace" },
    );
}

#[tokio::test]
async fn add_generates_distinct_ids() {
    let store = InMemoryStore::new();

    let first = store.add_document(doc! { "n": 1 }, "notes").await.unwrap();
    let second = store.add_document(doc! { "n": 2 }, "notes").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(first.len(), 32);
    assert_eq!(store.count("notes").await, 2);
}

#[tokio::test]
async fn missing_documents_cannot_be_merged_or_deleted() {
    let store = InMemoryStore::new();

    assert!(matches!(
        store.merge_document("nope", doc! { "a": 1 }, "courses").await,
        Err(StoreError::DocumentNotFound(id, collection)) if id == "nope" && collection == "courses"
    ));
    assert!(matches!(
        store.delete_document("nope", "courses").await,
        Err(StoreError::DocumentNotFound(..))
    ));
}

#[tokio::test]
async fn queries_filter_and_limit() {
    let store = InMemoryStore::new();

    for (id, course) in [("e1", "c1"), ("e2", "c2"), ("e3", "c1")] {
        store
            .set_document(id, doc! { "courseId": course }, "enrollments")
            .await
            .unwrap();
    }

    let matching = store
        .query_documents(
            Query::builder().filter(Filter::eq("courseId", "c1")).build(),
            "enrollments",
        )
        .await
        .unwrap();

    assert_eq!(
        matching.iter().map(|doc| doc.id.as_str()).collect::<Vec<_>>(),
        vec!["e1", "e3"],
    );

    let limited = store
        .query_documents(
            Query::builder().filter(Filter::eq("courseId", "c1")).limit(1).build(),
            "enrollments",
        )
        .await
        .unwrap();

    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, "e1");

    let absent = store
        .query_documents(
            Query::builder().filter(Filter::eq("courseId", Bson::Null)).build(),
            "enrollments",
        )
        .await
        .unwrap();

    assert!(absent.is_empty());
}

#[tokio::test]
async fn clones_share_state() {
    let store = InMemoryStore::new();
    let handle = store.clone();

    handle.set_document("s1", doc! { "title": "Week 1" }, "sessions").await.unwrap();

    assert_eq!(store.get_all("sessions").await.unwrap().len(), 1);

    store.delete_document("s1", "sessions").await.unwrap();

    assert!(handle.get_all("sessions").await.unwrap().is_empty());
}
