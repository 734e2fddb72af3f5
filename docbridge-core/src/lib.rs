//! Core of docbridge: a snake_case record adapter over camelCase document stores.
//!
//! This crate provides:
//!
//! - **Adapter** ([`adapter`]) - Canonical CRUD (`read`, `find`, `find_one`, `insert`, `update`, `delete`)
//! - **Store backend abstraction** ([`backend`]) - The capability set a remote document store must offer
//! - **Collections** ([`collection`]) - The closed set of collections and their identity fields
//! - **Conditions** ([`condition`]) - Conjunctive equality conditions on canonical fields
//! - **Naming** ([`naming`]) - The field alias table and record translation in both directions
//! - **Values** ([`value`]) - Tree conversion between JSON records and the store's BSON values
//! - **Queries** ([`query`]) - Store-native equality filters and limits
//! - **Configuration** ([`config`]) - Connection settings resolution with an ambient fallback
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use docbridge::{prelude::*, memory::InMemoryStore};
//! use serde_json::json;
//!
//! let adapter = DataAdapter::new(InMemoryStore::new());
//!
//! let course = adapter
//!     .insert(Collection::Courses, into_record(json!({ "course_id": "c1", "title": "Intro" }))?)
//!     .await?;
//!
//! assert_eq!(course["course_id"], "c1");
//! assert!(course["created_at"].is_string());
//! ```

#[allow(unused_extern_crates)]
extern crate self as docbridge_core;

pub mod adapter;
pub mod backend;
pub mod collection;
pub mod condition;
pub mod config;
pub mod error;
pub mod naming;
pub mod query;
pub mod value;
