//! MongoDB backend implementation for docbridge.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait.
//! Documents keep their camelCase field names and store their identifier as a string
//! `_id`, so records inserted through the adapter and records written by other clients
//! of the same database can be read side by side.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docbridge = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Connection
//!
//! The builder takes a connection string and database name, either directly or from
//! a [`StoreConfig`](docbridge_core::config::StoreConfig) resolved from the environment.
//!
//! # Example
//!
//! ```ignore
//! use docbridge::{prelude::*, mongodb::MongoDbStoreBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStoreBuilder::from_config(&StoreConfig::from_env())
//!         .build()
//!         .await?;
//!     let adapter = DataAdapter::new(store);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbridge_mongodb;

pub mod store;
pub mod query;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
