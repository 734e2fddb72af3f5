//! Main docbridge crate: snake_case records over camelCase document stores.
//!
//! This crate is the entry point for users of docbridge. It re-exports the core
//! types from the sub-crates and gives access to the available storage backends.
//!
//! # Features
//!
//! - **Field translation** - Records use snake_case names; the store keeps its camelCase names
//! - **Identity fields** - Collections keyed by a natural identifier are fetched directly
//! - **Query fallback** - Records stored under generated keys are still found by value
//! - **Timestamps** - `created_at` and `updated_at` are stamped on write and read back as ISO-8601
//!
//! # Quick Start
//!
//! ```ignore
//! use docbridge::{prelude::*, memory::InMemoryStore};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StoreError> {
//!     let adapter = DataAdapter::new(InMemoryStore::builder().build().await?);
//!
//!     adapter
//!         .insert(
//!             Collection::Courses,
//!             into_record(json!({ "course_id": "c1", "title": "Intro", "total_seats": 30 }))?,
//!         )
//!         .await?;
//!
//!     let updated = adapter
//!         .update(
//!             Collection::Courses,
//!             &Condition::new().eq("course_id", "c1"),
//!             into_record(json!({ "booked_seats": 1 }))?,
//!         )
//!         .await?;
//!
//!     println!("Updated course: {:?}", updated);
//!
//!     adapter.shutdown().await
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`mongodb`] - MongoDB backend (requires the `mongodb` feature)

pub mod prelude;

pub use docbridge_core::{adapter, backend, collection, condition, config, error, naming, query, value};

// Re-export BSON and JSON types for convenience
pub use bson;
pub use serde_json;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docbridge_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use docbridge_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
