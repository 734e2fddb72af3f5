//! In-memory document storage backend for docbridge.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend`
//! trait. It is the store injected into the adapter in tests and local development.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Shared handles** - Clones share state, so tests can seed and inspect the store
//! - **Equality queries** - Conjunctive equality filters with an optional limit
//!
//! # Quick Start
//!
//! ```ignore
//! use docbridge::{prelude::*, memory::InMemoryStore};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = DataAdapter::new(InMemoryStore::builder().build().await?);
//!
//!     adapter
//!         .insert(Collection::Users, into_record(json!({ "uid": "u1", "name": "Ada" }))?)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbridge_memory;

pub mod store;
pub mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
