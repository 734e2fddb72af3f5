//! Convenient re-exports of commonly used types from docbridge.
//!
//! ```ignore
//! use docbridge::prelude::*;
//! ```

pub use docbridge_core::{
    adapter::DataAdapter,
    backend::{StoreBackend, StoreBackendBuilder, StoredDocument},
    collection::Collection,
    condition::Condition,
    config::StoreConfig,
    error::{StoreError, StoreResult},
    naming::FieldAlias,
    query::{Query, QueryBuilder, Expr, Filter},
    value::{Record, into_record},
};
